//! Object storage for submission attachments.
//!
//! The [`Storage`] trait abstracts the backend; [`S3Storage`] talks to AWS S3
//! or any S3-compatible endpoint, and [`MockStorage`] keeps files in memory
//! for tests. [`upload_batch`] is the gateway the pipeline calls: it fans out
//! one upload per file and aggregates every per-file failure instead of
//! stopping at the first.

pub mod batch;
pub mod keys;
pub mod mock;
pub mod s3;
pub mod traits;

pub use batch::{upload_batch, FailedUpload, UploadBatchError};
pub use keys::{sanitize_file_name, storage_key};
pub use mock::MockStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
