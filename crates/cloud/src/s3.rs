//! S3-compatible blob storage.

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use outreach_core::content::LocalFile;
use outreach_core::upload::{check_file, storage_key, BlobUploader, UploadError, UploadRoute, UploadedFile};

use crate::config::S3Config;

/// Uploads files as objects in a single bucket.
#[derive(Clone)]
pub struct S3Uploader {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3Uploader {
    pub fn new(client: Client, bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Build a client from `config`.
    ///
    /// Static credentials are used when both keys are set; otherwise the
    /// default AWS provider chain (environment, profile, instance role).
    /// Path-style addressing is forced so MinIO-like endpoints work.
    pub async fn connect(config: &S3Config) -> Self {
        let region = Region::new(config.region.clone());

        let mut builder = match (&config.access_key_id, &config.secret_access_key) {
            (Some(key_id), Some(secret)) => {
                let credentials = Credentials::new(key_id, secret, None, None, "outreach-static");
                aws_sdk_s3::config::Builder::new()
                    .behavior_version(BehaviorVersion::latest())
                    .region(region)
                    .credentials_provider(credentials)
            }
            _ => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };
        builder = builder.force_path_style(true);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(builder.build());
        Self::new(client, &config.bucket, &config.public_base_url)
    }

    /// Public URL of an object key.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }
}

#[async_trait::async_trait]
impl BlobUploader for S3Uploader {
    async fn upload(
        &self,
        file: &LocalFile,
        route: UploadRoute,
    ) -> Result<UploadedFile, UploadError> {
        check_file(route, file)?;
        let key = storage_key(route, &file.file_name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(&file.content_type)
            .body(ByteStream::from(file.bytes.clone()))
            .send()
            .await
            .map_err(|e| UploadError::Service(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(%route, key = %key, size = file.size(), "Uploaded object");
        Ok(UploadedFile {
            url: self.object_url(&key),
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    async fn uploader() -> S3Uploader {
        S3Uploader::connect(&S3Config {
            bucket: "outreach".into(),
            region: "us-east-1".into(),
            endpoint: Some("http://127.0.0.1:1".into()),
            access_key_id: Some("test".into()),
            secret_access_key: Some("test".into()),
            public_base_url: "http://127.0.0.1:1/outreach".into(),
        })
        .await
    }

    #[tokio::test]
    async fn object_url_joins_base_and_key() {
        let s3 = uploader().await;
        assert_eq!(
            s3.object_url("images/abc-photo.png"),
            "http://127.0.0.1:1/outreach/images/abc-photo.png"
        );
    }

    #[tokio::test]
    async fn rejected_files_never_reach_the_bucket() {
        let s3 = uploader().await;
        let file = LocalFile::new("notes.txt", "text/plain", b"hello".to_vec());
        assert_matches!(
            s3.upload(&file, UploadRoute::Image).await,
            Err(UploadError::UnsupportedType { .. })
        );
    }
}
