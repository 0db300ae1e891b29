//! In-memory Storage implementation for tests.

use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock storage that keeps files in memory. File names added via
/// [`fail_uploads_containing`](MockStorage::fail_uploads_containing) make the
/// matching uploads fail, for exercising the batch error aggregation.
#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload whose key contains `fragment` fail.
    pub fn fail_uploads_containing(&self, fragment: &str) {
        self.failing.lock().unwrap().insert(fragment.to_string());
    }

    pub fn has_file(&self, key: &str) -> bool {
        self.files.lock().unwrap().contains_key(key)
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    /// Get file data (for test assertions)
    pub fn get_file(&self, key: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn put(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let failing = self.failing.lock().unwrap();
        if failing.iter().any(|f| storage_key.contains(f.as_str())) {
            return Err(StorageError::UploadFailed(format!(
                "simulated failure for {}",
                storage_key
            )));
        }
        drop(failing);

        self.files
            .lock()
            .unwrap()
            .insert(storage_key.to_string(), data);
        Ok(format!("https://storage.example.com/{}", storage_key))
    }
}
