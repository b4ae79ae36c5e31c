//! Services offered by the organization.

use outreach_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: DbId,
    pub project_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub project_name: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl Service {
    /// Apply an update. A missing image URL keeps the stored one.
    pub fn apply(&mut self, input: NewService) {
        self.project_name = input.project_name;
        self.description = input.description;
        if input.image_url.is_some() {
            self.image_url = input.image_url;
        }
    }
}
