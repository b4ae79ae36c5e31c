//! Upload routes and the blob-upload boundary.
//!
//! An upload route is a named server-side profile (image vs. document) with
//! its own size and type limits. Every [`BlobUploader`] must call
//! [`check_file`] before sending bytes anywhere.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::content::LocalFile;

/// 4 MiB.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// 32 MiB.
pub const MAX_DOCUMENT_BYTES: usize = 32 * 1024 * 1024;

/// File extensions accepted by the document route.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "ppt", "pptx"];

static UNSAFE_KEY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("static regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UploadRoute {
    Image,
    Document,
}

impl UploadRoute {
    pub fn route_name(self) -> &'static str {
        match self {
            Self::Image => "imageUploader",
            Self::Document => "documentUploader",
        }
    }

    /// Key prefix grouping blobs by route.
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Document => "documents",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            Self::Image => MAX_IMAGE_BYTES,
            Self::Document => MAX_DOCUMENT_BYTES,
        }
    }

    /// Files accepted per upload call.
    pub fn max_files(self) -> usize {
        1
    }
}

impl fmt::Display for UploadRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_name())
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    /// Public URL persisted on the record.
    pub url: String,
    /// Storage key, needed to locate the blob later.
    pub key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{file_name} is empty")]
    Empty { file_name: String },

    #[error("{file_name} is {size} bytes; {route} accepts at most {limit} bytes")]
    TooLarge {
        route: UploadRoute,
        file_name: String,
        size: usize,
        limit: usize,
    },

    #[error("{file_name} ({content_type}) is not accepted by {route}")]
    UnsupportedType {
        route: UploadRoute,
        file_name: String,
        content_type: String,
    },

    #[error("Upload service error: {0}")]
    Service(String),
}

/// The hosted blob store: accepts one file for a route, returns where it landed.
#[async_trait::async_trait]
pub trait BlobUploader: Send + Sync {
    async fn upload(&self, file: &LocalFile, route: UploadRoute)
        -> Result<UploadedFile, UploadError>;
}

/// Enforce the route's size and type limits on a file.
pub fn check_file(route: UploadRoute, file: &LocalFile) -> Result<(), UploadError> {
    if file.bytes.is_empty() {
        return Err(UploadError::Empty {
            file_name: file.file_name.clone(),
        });
    }

    let limit = route.max_bytes();
    if file.size() > limit {
        return Err(UploadError::TooLarge {
            route,
            file_name: file.file_name.clone(),
            size: file.size(),
            limit,
        });
    }

    let accepted = match route {
        UploadRoute::Image => file.content_type.starts_with("image/"),
        UploadRoute::Document => extension(&file.file_name)
            .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.as_str())),
    };
    if !accepted {
        return Err(UploadError::UnsupportedType {
            route,
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
        });
    }

    Ok(())
}

/// Build a unique storage key: `<prefix>/<uuid>-<sanitized file name>`.
pub fn storage_key(route: UploadRoute, file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let sanitized = UNSAFE_KEY_CHARS.replace_all(base, "-");
    let sanitized = sanitized.trim_matches('-');
    let sanitized = if sanitized.is_empty() { "file" } else { sanitized };
    format!(
        "{}/{}-{}",
        route.key_prefix(),
        uuid::Uuid::new_v4(),
        sanitized
    )
}

fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn image_route_accepts_images_up_to_limit() {
        let file = LocalFile::new("x.png", "image/png", vec![0u8; MAX_IMAGE_BYTES]);
        assert!(check_file(UploadRoute::Image, &file).is_ok());

        let file = LocalFile::new("x.png", "image/png", vec![0u8; MAX_IMAGE_BYTES + 1]);
        assert_matches!(
            check_file(UploadRoute::Image, &file),
            Err(UploadError::TooLarge { limit: MAX_IMAGE_BYTES, .. })
        );
    }

    #[test]
    fn image_route_rejects_non_images() {
        let file = LocalFile::new("notes.pdf", "application/pdf", vec![1u8; 8]);
        assert_matches!(
            check_file(UploadRoute::Image, &file),
            Err(UploadError::UnsupportedType { .. })
        );
    }

    #[test]
    fn document_route_checks_extension_case_insensitively() {
        let file = LocalFile::new("Report.PDF", "application/octet-stream", vec![1u8; 8]);
        assert!(check_file(UploadRoute::Document, &file).is_ok());

        let file = LocalFile::new("script.exe", "application/octet-stream", vec![1u8; 8]);
        assert_matches!(
            check_file(UploadRoute::Document, &file),
            Err(UploadError::UnsupportedType { .. })
        );

        let file = LocalFile::new("noextension", "application/pdf", vec![1u8; 8]);
        assert!(check_file(UploadRoute::Document, &file).is_err());
    }

    #[test]
    fn empty_file_is_rejected() {
        let file = LocalFile::new("x.png", "image/png", Vec::new());
        assert_matches!(
            check_file(UploadRoute::Image, &file),
            Err(UploadError::Empty { .. })
        );
    }

    #[test]
    fn storage_key_is_prefixed_and_sanitized() {
        let key = storage_key(UploadRoute::Image, "../My Photo (1).png");
        assert!(key.starts_with("images/"));
        assert!(key.ends_with("-My-Photo-1-.png"), "unexpected key {key}");
        assert!(!key.contains(' '));
        assert!(!key.contains(".."));

        let first = storage_key(UploadRoute::Document, "a.pdf");
        let second = storage_key(UploadRoute::Document, "a.pdf");
        assert_ne!(first, second);
        assert!(first.starts_with("documents/"));
    }
}
