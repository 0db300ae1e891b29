//! Submission validation.
//!
//! Checks are batch-style throughout: every missing field and every per-file
//! violation is collected before an error is produced, so the caller sees the
//! complete picture instead of the first problem found.

/// Limits applied to attached files.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    pub require_attachment: bool,
}

impl UploadPolicy {
    fn allows_content_type(&self, content_type: &str) -> bool {
        self.allowed_content_types
            .iter()
            .any(|ct| content_type.to_lowercase().contains(&ct.to_lowercase()))
    }
}

/// One rejected file and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileViolation {
    TooLarge {
        file_name: String,
        size_bytes: usize,
        max_bytes: usize,
    },
    UnsupportedType {
        file_name: String,
        content_type: String,
    },
}

impl std::fmt::Display for FileViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileViolation::TooLarge {
                file_name,
                size_bytes,
                max_bytes,
            } => write!(
                f,
                "{}: {} bytes exceeds the {} MB limit",
                file_name,
                size_bytes,
                max_bytes / 1024 / 1024
            ),
            FileViolation::UnsupportedType {
                file_name,
                content_type,
            } => write!(f, "{}: unsupported file type '{}'", file_name, content_type),
        }
    }
}

/// Validation errors. Field names use the wire (camelCase) spelling so error
/// messages match what the form actually sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("At least one file must be attached")]
    NoAttachments,

    #[error("Invalid files: {}", .0.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; "))]
    InvalidFiles(Vec<FileViolation>),
}

/// Validate a submission against the upload policy.
///
/// Order: required scalar fields, then attachment presence, then per-file
/// constraints. Each stage aggregates all of its findings.
pub fn validate(
    submission: &crate::models::Submission,
    policy: &UploadPolicy,
) -> Result<(), ValidationError> {
    let required = [
        ("fullName", submission.full_name.trim()),
        ("email", submission.email.trim()),
        ("department", submission.department.trim()),
        ("projectType", submission.project_type.trim()),
    ];
    let missing: Vec<String> = required
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    if policy.require_attachment && submission.attachments.is_empty() {
        return Err(ValidationError::NoAttachments);
    }

    let violations: Vec<FileViolation> = submission
        .attachments
        .iter()
        .flat_map(|file| {
            let mut found = Vec::new();
            if file.size_bytes() > policy.max_file_size_bytes {
                found.push(FileViolation::TooLarge {
                    file_name: file.original_name.clone(),
                    size_bytes: file.size_bytes(),
                    max_bytes: policy.max_file_size_bytes,
                });
            }
            if !policy.allows_content_type(&file.content_type) {
                found.push(FileViolation::UnsupportedType {
                    file_name: file.original_name.clone(),
                    content_type: file.content_type.clone(),
                });
            }
            found
        })
        .collect();
    if !violations.is_empty() {
        return Err(ValidationError::InvalidFiles(violations));
    }

    Ok(())
}
