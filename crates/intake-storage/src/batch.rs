//! Batch upload gateway.
//!
//! Uploads every attachment of a submission, one storage call per file,
//! issued concurrently. Per-file failures are collected, never fatal on the
//! first error: the caller either gets every file back or one error that
//! names each file that failed and why.

use futures::future::join_all;
use std::fmt;

use intake_core::models::{RawFile, UploadedFile};

use crate::keys::storage_key;
use crate::traits::Storage;

/// One file that failed to upload, with its cause.
#[derive(Debug, Clone)]
pub struct FailedUpload {
    pub file_name: String,
    pub cause: String,
}

/// Aggregated error for a batch with one or more failed uploads.
#[derive(Debug)]
pub struct UploadBatchError {
    pub failures: Vec<FailedUpload>,
}

impl fmt::Display for UploadBatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to upload {} file(s): ", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} ({})", failure.file_name, failure.cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for UploadBatchError {}

impl UploadBatchError {
    pub fn failed_file_names(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.file_name.clone()).collect()
    }
}

/// Upload all files of one submission.
///
/// `submitted_at_millis` prefixes every storage key so the batch cannot
/// collide with another submission reusing the same file names. On full
/// success the returned list preserves input order. On any failure the whole
/// batch is reported as failed; files that did upload stay in storage (no
/// compensating delete).
pub async fn upload_batch(
    storage: &dyn Storage,
    submitted_at_millis: i64,
    files: &[RawFile],
) -> Result<Vec<UploadedFile>, UploadBatchError> {
    let uploads = files.iter().map(|file| {
        let key = storage_key(submitted_at_millis, &file.original_name);
        async move {
            match storage
                .put(&key, &file.content_type, file.data.to_vec())
                .await
            {
                Ok(url) => Ok(UploadedFile {
                    name: file.original_name.clone(),
                    storage_key: key,
                    url,
                }),
                Err(e) => Err(FailedUpload {
                    file_name: file.original_name.clone(),
                    cause: e.to_string(),
                }),
            }
        }
    });

    let mut uploaded = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for outcome in join_all(uploads).await {
        match outcome {
            Ok(file) => uploaded.push(file),
            Err(failure) => failures.push(failure),
        }
    }

    if failures.is_empty() {
        Ok(uploaded)
    } else {
        let error = UploadBatchError { failures };
        tracing::warn!(
            total = files.len(),
            failed = error.failures.len(),
            error = %error,
            "Upload batch completed with failures"
        );
        Err(error)
    }
}
