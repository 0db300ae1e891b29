//! Domain models for a form submission and its response payload.
//!
//! A [`Submission`] is built once from the inbound multipart form, read by the
//! pipeline, and discarded when the response goes out. Nothing here is
//! persisted.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One attached file as received from the form, before upload.
///
/// The raw bytes are owned by the submission for the duration of the request;
/// the upload gateway borrows them only for the upload call.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl RawFile {
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// One complete form payload plus its attached files.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub event_name: Option<String>,
    pub quantity: Option<u32>,
    pub project_type: String,
    pub project_description: Option<String>,
    pub attachments: Vec<RawFile>,
}

/// A file that was successfully persisted to object storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original (display) file name as submitted.
    pub name: String,
    /// Sanitized, collision-resistant key under which the file is stored.
    pub storage_key: String,
    /// Publicly retrievable URL, derived from the storage key.
    pub url: String,
}

/// The `files` entry in the success response: display name and public URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFileEntry {
    pub name: String,
    pub url: String,
}

impl From<&UploadedFile> for UploadedFileEntry {
    fn from(file: &UploadedFile) -> Self {
        Self {
            name: file.name.clone(),
            url: file.url.clone(),
        }
    }
}

/// JSON body returned for every submission, success or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<UploadedFileEntry>>,
    /// Underlying error detail. Only populated outside production.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn success(files: &[UploadedFile]) -> Self {
        Self {
            success: true,
            message: "Request submitted successfully".to_string(),
            files: Some(files.iter().map(UploadedFileEntry::from).collect()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            files: None,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_carries_one_entry_per_file() {
        let files = vec![
            UploadedFile {
                name: "poster.pdf".to_string(),
                storage_key: "requests/1_poster.pdf".to_string(),
                url: "https://bucket.s3.us-east-1.amazonaws.com/requests/1_poster.pdf".to_string(),
            },
            UploadedFile {
                name: "logo.png".to_string(),
                storage_key: "requests/1_logo.png".to_string(),
                url: "https://bucket.s3.us-east-1.amazonaws.com/requests/1_logo.png".to_string(),
            },
        ];
        let resp = SubmitResponse::success(&files);
        assert!(resp.success);
        let entries = resp.files.expect("files present");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "poster.pdf");
        assert!(entries[1].url.ends_with("requests/1_logo.png"));
    }

    #[test]
    fn failure_response_omits_empty_fields_in_json() {
        let resp = SubmitResponse::failure("Request too large", None);
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Request too large");
        assert!(json.get("files").is_none());
        assert!(json.get("error").is_none());
    }
}
