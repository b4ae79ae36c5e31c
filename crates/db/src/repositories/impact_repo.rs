//! Repository for the `impact` table.
//!
//! Reads return [`ImpactStory`] values already lifted to the current shape;
//! see [`crate::models::impact`] for the upgrade rules.

use outreach_core::types::DbId;
use sqlx::PgPool;

use crate::models::impact::{ImpactRow, ImpactStory, NewImpact, CURRENT_SCHEMA_VERSION};

const COLUMNS: &str = "\
    id, heading, description, media_type, media_url, image_url, \
    schema_version, created_at";

pub struct ImpactRepo;

impl ImpactRepo {
    pub async fn create(pool: &PgPool, input: &NewImpact) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO impact (heading, description, media_type, media_url, schema_version) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&input.heading)
        .bind(&input.description)
        .bind(input.media_type.as_str())
        .bind(&input.media_url)
        .bind(CURRENT_SCHEMA_VERSION)
        .fetch_one(pool)
        .await
    }

    /// Overwrite an impact story, leaving the row in the current shape.
    ///
    /// Without a new media URL the stored one is kept only when the media
    /// type is unchanged.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewImpact,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE impact SET \
                 heading = $2, \
                 description = $3, \
                 media_url = CASE \
                     WHEN $5::text IS NOT NULL THEN $5::text \
                     WHEN COALESCE(media_type, 'image') = $4 THEN COALESCE(media_url, image_url) \
                     ELSE NULL END, \
                 media_type = $4, \
                 image_url = NULL, \
                 schema_version = $6 \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.heading)
        .bind(&input.description)
        .bind(input.media_type.as_str())
        .bind(&input.media_url)
        .bind(CURRENT_SCHEMA_VERSION)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ImpactStory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM impact WHERE id = $1");
        let row = sqlx::query_as::<_, ImpactRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ImpactRow::migrate))
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<ImpactStory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM impact ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, ImpactRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ImpactRow::migrate).collect())
    }

    /// Rewrite every legacy row into the current shape, using the same rules
    /// as [`ImpactRow::migrate`]. Returns the number of rows upgraded.
    pub async fn upgrade_legacy_rows(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE impact SET \
                 media_url = COALESCE(media_url, image_url), \
                 media_type = CASE \
                     WHEN media_type = 'video' AND media_url IS NOT NULL \
                         THEN 'video' \
                     ELSE 'image' END, \
                 image_url = NULL, \
                 schema_version = $1 \
             WHERE schema_version < $1",
        )
        .bind(CURRENT_SCHEMA_VERSION)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
