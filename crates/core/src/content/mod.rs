//! Content collections, their enumerated field values, and the draft model.
//!
//! A draft is the in-progress form for one record. Drafts hold raw strings as
//! typed by an editor plus any attached files; they are checked with
//! [`Draft::validate`] before anything leaves the process.

mod draft;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use draft::{ImpactDraft, ResourceDraft, ServiceDraft, SupportDraft};

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// The four record collections held by the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Services,
    Impact,
    Support,
    Resources,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Services,
        Collection::Impact,
        Collection::Support,
        Collection::Resources,
    ];

    /// Database table backing the collection.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Impact => "impact",
            Self::Support => "support",
            Self::Resources => "resources",
        }
    }

    /// URL path segment used by the HTTP surface.
    pub fn slug(self) -> &'static str {
        self.table_name()
    }

    /// Human-readable singular noun used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Services => "service",
            Self::Impact => "impact story",
            Self::Support => "support case",
            Self::Resources => "resource",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

// ---------------------------------------------------------------------------
// Enumerated field values
// ---------------------------------------------------------------------------

/// Generates a lowercase wire enum with `as_str`, `Display` and `FromStr`.
///
/// The first variant is the form default.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal, { $first:ident => $first_s:literal $(, $variant:ident => $s:literal)* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            #[default]
            $first,
            $($variant,)*
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    Self::$first => $first_s,
                    $(Self::$variant => $s,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $first_s => Ok(Self::$first),
                    $($s => Ok(Self::$variant),)*
                    other => Err(ValidationError::new(
                        $field,
                        format!(
                            "Invalid value '{other}'. Must be one of: {}",
                            [$first_s $(, $s)*].join(", ")
                        ),
                    )),
                }
            }
        }
    };
}

wire_enum!(
    /// How an impact story is illustrated.
    MediaType, "mediaType", { Image => "image", Video => "video" }
);

wire_enum!(
    /// Who a support case is about.
    SupportCategory, "category", { Mother => "mother", Child => "child" }
);

wire_enum!(
    /// Whether a resource is a hosted document or an external link.
    ResourceType, "resourceType", { Document => "document", Link => "link" }
);

// ---------------------------------------------------------------------------
// Files and drafts
// ---------------------------------------------------------------------------

/// A file attached to a draft, held in memory until it is uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for LocalFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Whether a draft is being submitted as a new record or as an edit.
///
/// Edits may omit files that were required at create time; the stored URL
/// is kept in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Create,
    Update,
}

/// Behaviour shared by every content draft.
///
/// `Default` must produce the empty initial form state.
pub trait Draft: Default + Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Wire names of the text fields, in form order.
    const TEXT_FIELDS: &'static [&'static str];

    /// Wire names of the file inputs, in form order.
    const FILE_FIELDS: &'static [&'static str];

    /// Assign a text field by its wire name.
    fn set_text(&mut self, field: &str, value: String) -> Result<(), ValidationError>;

    /// Attach a file to the input with the given wire name.
    ///
    /// Every input accepts exactly one file.
    fn attach(&mut self, field: &str, file: LocalFile) -> Result<(), ValidationError>;

    /// Check required fields and formats, reporting the first unmet constraint.
    fn validate(&self, intent: Intent) -> Result<(), ValidationError>;

    fn is_valid(&self, intent: Intent) -> bool {
        self.validate(intent).is_ok()
    }
}
