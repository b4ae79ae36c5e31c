/// Default base URL for the in-memory backend.
const DEFAULT_MEMORY_BASE_URL: &str = "http://localhost:3000/uploads";

/// Default region when `S3_REGION` is unset.
const DEFAULT_REGION: &str = "us-east-1";

/// Which blob store receives uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    S3(S3Config),
    Memory { public_base_url: String },
}

/// Connection settings for an S3-compatible bucket.
#[derive(Clone, PartialEq, Eq)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services. `None` uses AWS.
    pub endpoint: Option<String>,
    /// Static credentials. When absent the default AWS provider chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Prefix of the public URL returned for each object, without a trailing slash.
    pub public_base_url: String,
}

impl std::fmt::Debug for S3Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Config")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "***"))
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `STORAGE_BACKEND`      | `s3`                             |
    /// | `S3_BUCKET`            | required for `s3`                |
    /// | `S3_REGION`            | `us-east-1`                      |
    /// | `S3_ENDPOINT`          | --                               |
    /// | `S3_ACCESS_KEY_ID`     | --                               |
    /// | `S3_SECRET_ACCESS_KEY` | --                               |
    /// | `S3_PUBLIC_BASE_URL`   | derived from endpoint and bucket |
    /// | `UPLOADS_BASE_URL`     | `http://localhost:3000/uploads`  |
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend, or when `s3` is selected without a bucket.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StorageConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = var("STORAGE_BACKEND").unwrap_or_else(|| "s3".into());
        match backend.to_ascii_lowercase().as_str() {
            "memory" => StorageConfig::Memory {
                public_base_url: var("UPLOADS_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_MEMORY_BASE_URL.into())
                    .trim_end_matches('/')
                    .to_string(),
            },
            "s3" => {
                let bucket = var("S3_BUCKET").expect("S3_BUCKET must be set when STORAGE_BACKEND=s3");
                let region = var("S3_REGION").unwrap_or_else(|| DEFAULT_REGION.into());
                let endpoint = var("S3_ENDPOINT").map(|e| e.trim_end_matches('/').to_string());
                let public_base_url = var("S3_PUBLIC_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| default_public_base_url(&bucket, &region, endpoint.as_deref()));
                StorageConfig::S3(S3Config {
                    bucket,
                    region,
                    endpoint,
                    access_key_id: var("S3_ACCESS_KEY_ID"),
                    secret_access_key: var("S3_SECRET_ACCESS_KEY"),
                    public_base_url,
                })
            }
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be one of: s3, memory"),
        }
    }
}

/// Path-style URL on a custom endpoint, virtual-hosted style on AWS.
fn default_public_base_url(bucket: &str, region: &str, endpoint: Option<&str>) -> String {
    match endpoint {
        Some(endpoint) => format!("{endpoint}/{bucket}"),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com"),
    }
}
