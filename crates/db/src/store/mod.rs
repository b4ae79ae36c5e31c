//! The content store boundary.
//!
//! Handlers and the admin form workflow only see [`ContentStore`]; the
//! concrete store is constructed once at start-up and injected. Writes are
//! last-write-wins: there is no version check or locking.

mod memory;
mod postgres;

use outreach_core::content::Collection;
use outreach_core::types::DbId;

use crate::models::{NewRecord, Record};

pub use memory::MemoryContentStore;
pub use postgres::PgContentStore;

/// PostgreSQL `check_violation`.
const CHECK_VIOLATION: &str = "23514";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{collection} record {id} not found")]
    NotFound { collection: Collection, id: DbId },

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(CHECK_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::Constraint(constraint);
            }
        }
        StoreError::Database(err)
    }
}

/// Create, update and list operations over the four collections.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a record; `created_at` is assigned by the store.
    async fn create(&self, record: NewRecord) -> Result<DbId, StoreError>;

    /// Overwrite the record `id` in the collection `record` belongs to.
    async fn update(&self, id: DbId, record: NewRecord) -> Result<DbId, StoreError>;

    async fn find(&self, collection: Collection, id: DbId) -> Result<Option<Record>, StoreError>;

    /// Every record in the collection, newest first.
    async fn list(&self, collection: Collection) -> Result<Vec<Record>, StoreError>;

    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
