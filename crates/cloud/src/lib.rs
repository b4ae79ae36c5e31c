//! Blob storage backends for uploaded images and documents.
//!
//! - [`config`] -- storage backend selection from the environment
//! - [`s3`] -- S3-compatible object storage (AWS, MinIO, R2)
//! - [`memory`] -- in-process store for tests and local runs

pub mod config;
pub mod memory;
pub mod s3;

use std::sync::Arc;

use outreach_core::upload::BlobUploader;

pub use config::{S3Config, StorageConfig};
pub use memory::MemoryUploader;
pub use s3::S3Uploader;

/// Construct the uploader selected by `config`.
pub async fn build_uploader(config: &StorageConfig) -> Arc<dyn BlobUploader> {
    match config {
        StorageConfig::S3(s3) => {
            tracing::info!(bucket = %s3.bucket, region = %s3.region, "Using S3 blob storage");
            Arc::new(S3Uploader::connect(s3).await)
        }
        StorageConfig::Memory { public_base_url } => {
            tracing::warn!("Using in-memory blob storage; uploads are lost on restart");
            Arc::new(MemoryUploader::new(public_base_url.clone()))
        }
    }
}
