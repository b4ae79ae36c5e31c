//! Repository for the `support` table.

use outreach_core::types::DbId;
use sqlx::PgPool;

use crate::models::support::{NewSupport, SupportCase};

const COLUMNS: &str = "id, category, name, age, location, story, image_url, created_at";

pub struct SupportRepo;

impl SupportRepo {
    pub async fn create(pool: &PgPool, input: &NewSupport) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO support (category, name, age, location, story, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(input.category.as_str())
        .bind(&input.name)
        .bind(input.age)
        .bind(&input.location)
        .bind(&input.story)
        .bind(&input.image_url)
        .fetch_one(pool)
        .await
    }

    /// Overwrite a support case. A `None` image URL keeps the stored one.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewSupport,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE support SET \
                 category = $2, \
                 name = $3, \
                 age = $4, \
                 location = $5, \
                 story = $6, \
                 image_url = COALESCE($7, image_url) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(input.category.as_str())
        .bind(&input.name)
        .bind(input.age)
        .bind(&input.location)
        .bind(&input.story)
        .bind(&input.image_url)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SupportCase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM support WHERE id = $1");
        sqlx::query_as::<_, SupportCase>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<SupportCase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM support ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, SupportCase>(&query)
            .fetch_all(pool)
            .await
    }
}
