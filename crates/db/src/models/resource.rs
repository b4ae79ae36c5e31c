//! Downloadable documents and external links.

use outreach_core::content::ResourceType;
use outreach_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `resources` table.
///
/// Exactly one of `resource_url` / `document_url` is populated, matching
/// `resource_type`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub resource_type: String,
    pub resource_url: Option<String>,
    pub document_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub name: String,
    pub description: String,
    pub resource_type: ResourceType,
    pub resource_url: Option<String>,
    pub document_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl NewResource {
    /// Whether the URL matching `resource_type` is present and the other absent.
    pub fn has_matching_url(&self) -> bool {
        match self.resource_type {
            ResourceType::Link => self.resource_url.is_some() && self.document_url.is_none(),
            ResourceType::Document => self.document_url.is_some() && self.resource_url.is_none(),
        }
    }
}

impl Resource {
    /// Apply an update, mirroring `ResourceRepo::update`.
    ///
    /// A document resource without a new upload keeps its stored document
    /// only if it already was a document. A missing thumbnail keeps the
    /// stored one. Returns `false` when the result would break the
    /// one-URL-per-type invariant; `self` is left untouched in that case.
    pub fn apply(&mut self, input: NewResource) -> bool {
        let was_document = self.resource_type == ResourceType::Document.as_str();
        let (resource_url, document_url) = match input.resource_type {
            ResourceType::Link => (input.resource_url, None),
            ResourceType::Document => (
                None,
                input
                    .document_url
                    .or_else(|| was_document.then(|| self.document_url.clone()).flatten()),
            ),
        };
        let valid = match input.resource_type {
            ResourceType::Link => resource_url.is_some(),
            ResourceType::Document => document_url.is_some(),
        };
        if !valid {
            return false;
        }

        self.name = input.name;
        self.description = input.description;
        self.resource_type = input.resource_type.as_str().to_string();
        self.resource_url = resource_url;
        self.document_url = document_url;
        if input.thumbnail_url.is_some() {
            self.thumbnail_url = input.thumbnail_url;
        }
        true
    }
}
