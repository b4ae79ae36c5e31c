//! Mothers and children supported by the organization.

use outreach_core::content::SupportCategory;
use outreach_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `support` table.
///
/// `category` is constrained to `mother` / `child` by the schema.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportCase {
    pub id: DbId,
    pub category: String,
    pub name: String,
    pub age: i32,
    pub location: String,
    pub story: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSupport {
    pub category: SupportCategory,
    pub name: String,
    pub age: i32,
    pub location: String,
    pub story: String,
    pub image_url: Option<String>,
}

impl SupportCase {
    /// Apply an update. A missing image URL keeps the stored one.
    pub fn apply(&mut self, input: NewSupport) {
        self.category = input.category.as_str().to_string();
        self.name = input.name;
        self.age = input.age;
        self.location = input.location;
        self.story = input.story;
        if input.image_url.is_some() {
            self.image_url = input.image_url;
        }
    }
}
