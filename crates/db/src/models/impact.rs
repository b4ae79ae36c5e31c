//! Impact stories, including the upgrade from the legacy row shape.
//!
//! Rows written before media types existed only carry `image_url`
//! (`schema_version = 1`). [`ImpactRow::migrate`] lifts any row to the current
//! shape on read, and `ImpactRepo::upgrade_legacy_rows` rewrites the stored
//! rows once at start-up with the same rules so later reads are pass-through.

use outreach_core::content::MediaType;
use outreach_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Legacy shape: `image_url` only.
pub const LEGACY_SCHEMA_VERSION: i16 = 1;

/// Current shape: `media_type` + `media_url`.
pub const CURRENT_SCHEMA_VERSION: i16 = 2;

/// A raw row from the `impact` table, in whichever shape it was stored.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ImpactRow {
    pub id: DbId,
    pub heading: String,
    pub description: String,
    pub media_type: Option<String>,
    pub media_url: Option<String>,
    pub image_url: Option<String>,
    pub schema_version: i16,
    pub created_at: Timestamp,
}

/// An impact story in the current shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactStory {
    pub id: DbId,
    pub heading: String,
    pub description: String,
    pub media_type: MediaType,
    pub media_url: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewImpact {
    pub heading: String,
    pub description: String,
    pub media_type: MediaType,
    pub media_url: Option<String>,
}

impl ImpactRow {
    /// Lift the row to the current shape.
    ///
    /// A video keeps only its own `media_url`; a stored video without one
    /// becomes `image`, as does a missing or unknown media type. Image stories
    /// fall back to the legacy `image_url`.
    pub fn migrate(self) -> ImpactStory {
        let media_type = match self.media_type.as_deref().map(str::parse::<MediaType>) {
            Some(Ok(MediaType::Video)) if self.media_url.is_some() => MediaType::Video,
            _ => MediaType::Image,
        };
        let media_url = self.media_url.or(self.image_url);
        if self.schema_version < CURRENT_SCHEMA_VERSION {
            tracing::debug!(impact_id = self.id, "Migrated legacy impact row on read");
        }
        ImpactStory {
            id: self.id,
            heading: self.heading,
            description: self.description,
            media_type,
            media_url,
            created_at: self.created_at,
        }
    }
}

impl ImpactStory {
    /// Apply an update, mirroring `ImpactRepo::update`.
    ///
    /// Without a new URL the stored one is kept only when the media type is
    /// unchanged.
    pub fn apply(&mut self, input: NewImpact) {
        let media_url = match input.media_url {
            Some(url) => Some(url),
            None if input.media_type == self.media_type => self.media_url.take(),
            None => None,
        };
        self.heading = input.heading;
        self.description = input.description;
        self.media_type = input.media_type;
        self.media_url = media_url;
    }
}
