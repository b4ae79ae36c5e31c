//! Repository for the `resources` table.

use outreach_core::types::DbId;
use sqlx::PgPool;

use crate::models::resource::{NewResource, Resource};

const COLUMNS: &str = "\
    id, name, description, resource_type, resource_url, document_url, \
    thumbnail_url, created_at";

pub struct ResourceRepo;

impl ResourceRepo {
    pub async fn create(pool: &PgPool, input: &NewResource) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO resources \
                 (name, description, resource_type, resource_url, document_url, thumbnail_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.resource_type.as_str())
        .bind(&input.resource_url)
        .bind(&input.document_url)
        .bind(&input.thumbnail_url)
        .fetch_one(pool)
        .await
    }

    /// Overwrite a resource.
    ///
    /// The URL column not matching `resource_type` is cleared. A document
    /// without a new upload keeps its stored document only if the row already
    /// was a document; otherwise the CHECK constraint rejects the update.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewResource,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE resources SET \
                 name = $2, \
                 description = $3, \
                 resource_url = CASE WHEN $4 = 'link' THEN $5::text ELSE NULL END, \
                 document_url = CASE \
                     WHEN $4 = 'document' THEN COALESCE( \
                         $6::text, \
                         CASE WHEN resource_type = 'document' THEN document_url END) \
                     ELSE NULL END, \
                 thumbnail_url = COALESCE($7::text, thumbnail_url), \
                 resource_type = $4 \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.resource_type.as_str())
        .bind(&input.resource_url)
        .bind(&input.document_url)
        .bind(&input.thumbnail_url)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = $1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Resource>(&query).fetch_all(pool).await
    }
}
