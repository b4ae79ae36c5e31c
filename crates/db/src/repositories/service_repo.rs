//! Repository for the `services` table.

use outreach_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{NewService, Service};

/// Column list for `services` queries.
const COLUMNS: &str = "id, project_name, description, image_url, created_at";

pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a service, returning the new id.
    pub async fn create(pool: &PgPool, input: &NewService) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO services (project_name, description, image_url) \
             VALUES ($1, $2, $3) \
             RETURNING id",
        )
        .bind(&input.project_name)
        .bind(&input.description)
        .bind(&input.image_url)
        .fetch_one(pool)
        .await
    }

    /// Overwrite a service. A `None` image URL keeps the stored one.
    ///
    /// Returns `None` if no service with the given id exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewService,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE services SET \
                 project_name = $2, \
                 description = $3, \
                 image_url = COALESCE($4, image_url) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.project_name)
        .bind(&input.description)
        .bind(&input.image_url)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All services, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }
}
