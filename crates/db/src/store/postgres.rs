use outreach_core::content::Collection;
use outreach_core::types::DbId;

use super::{ContentStore, StoreError};
use crate::models::{NewRecord, Record};
use crate::repositories::{ImpactRepo, ResourceRepo, ServiceRepo, SupportRepo};
use crate::DbPool;

/// [`ContentStore`] backed by the PostgreSQL repositories.
#[derive(Clone)]
pub struct PgContentStore {
    pool: DbPool,
}

impl PgContentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// One-time start-up step: rewrite legacy impact rows into the current shape.
    pub async fn upgrade_legacy_rows(&self) -> Result<u64, StoreError> {
        let upgraded = ImpactRepo::upgrade_legacy_rows(&self.pool).await?;
        if upgraded > 0 {
            tracing::info!(upgraded, "Upgraded legacy impact rows");
        }
        Ok(upgraded)
    }

    /// Close the pool. Called once during shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl ContentStore for PgContentStore {
    async fn create(&self, record: NewRecord) -> Result<DbId, StoreError> {
        let id = match &record {
            NewRecord::Service(input) => ServiceRepo::create(&self.pool, input).await?,
            NewRecord::Impact(input) => ImpactRepo::create(&self.pool, input).await?,
            NewRecord::Support(input) => SupportRepo::create(&self.pool, input).await?,
            NewRecord::Resource(input) => ResourceRepo::create(&self.pool, input).await?,
        };
        tracing::debug!(collection = %record.collection(), id, "Record inserted");
        Ok(id)
    }

    async fn update(&self, id: DbId, record: NewRecord) -> Result<DbId, StoreError> {
        let updated = match &record {
            NewRecord::Service(input) => ServiceRepo::update(&self.pool, id, input).await?,
            NewRecord::Impact(input) => ImpactRepo::update(&self.pool, id, input).await?,
            NewRecord::Support(input) => SupportRepo::update(&self.pool, id, input).await?,
            NewRecord::Resource(input) => ResourceRepo::update(&self.pool, id, input).await?,
        };
        updated.ok_or(StoreError::NotFound {
            collection: record.collection(),
            id,
        })
    }

    async fn find(&self, collection: Collection, id: DbId) -> Result<Option<Record>, StoreError> {
        let record = match collection {
            Collection::Services => ServiceRepo::find_by_id(&self.pool, id)
                .await?
                .map(Record::Service),
            Collection::Impact => ImpactRepo::find_by_id(&self.pool, id)
                .await?
                .map(Record::Impact),
            Collection::Support => SupportRepo::find_by_id(&self.pool, id)
                .await?
                .map(Record::Support),
            Collection::Resources => ResourceRepo::find_by_id(&self.pool, id)
                .await?
                .map(Record::Resource),
        };
        Ok(record)
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Record>, StoreError> {
        let records = match collection {
            Collection::Services => ServiceRepo::list_all(&self.pool)
                .await?
                .into_iter()
                .map(Record::Service)
                .collect(),
            Collection::Impact => ImpactRepo::list_all(&self.pool)
                .await?
                .into_iter()
                .map(Record::Impact)
                .collect(),
            Collection::Support => SupportRepo::list_all(&self.pool)
                .await?
                .into_iter()
                .map(Record::Support)
                .collect(),
            Collection::Resources => ResourceRepo::list_all(&self.pool)
                .await?
                .into_iter()
                .map(Record::Resource)
                .collect(),
        };
        Ok(records)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
