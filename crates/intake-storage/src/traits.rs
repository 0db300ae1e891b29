//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The upload gateway works against this trait so the pipeline never couples
/// to a specific backend, and tests can substitute an in-memory one.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `storage_key` and return the publicly retrievable
    /// URL. The URL is derived deterministically from the key; no extra
    /// round-trip is made after the upload succeeds.
    async fn put(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;
}
