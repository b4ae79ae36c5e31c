//! In-process blob storage.

use std::collections::HashMap;

use outreach_core::content::LocalFile;
use outreach_core::upload::{check_file, storage_key, BlobUploader, UploadError, UploadRoute, UploadedFile};
use tokio::sync::Mutex;

/// Keeps uploaded files in memory, keyed by storage key.
///
/// Enforces the same route limits as the S3 backend.
pub struct MemoryUploader {
    public_base_url: String,
    objects: Mutex<HashMap<String, LocalFile>>,
}

impl MemoryUploader {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<LocalFile> {
        self.objects.lock().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.lock().await.is_empty()
    }
}

#[async_trait::async_trait]
impl BlobUploader for MemoryUploader {
    async fn upload(
        &self,
        file: &LocalFile,
        route: UploadRoute,
    ) -> Result<UploadedFile, UploadError> {
        check_file(route, file)?;
        let key = storage_key(route, &file.file_name);
        self.objects.lock().await.insert(key.clone(), file.clone());
        Ok(UploadedFile {
            url: format!("{}/{key}", self.public_base_url),
            key,
        })
    }
}
