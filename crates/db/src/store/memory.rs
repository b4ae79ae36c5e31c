use chrono::Utc;
use outreach_core::content::Collection;
use outreach_core::types::DbId;
use tokio::sync::Mutex;

use super::{ContentStore, StoreError};
use crate::models::{
    ImpactStory, NewRecord, NewResource, Record, Resource, Service, SupportCase,
};

/// In-process [`ContentStore`] with the same update semantics as the
/// PostgreSQL store. Used by tests and database-less local runs.
#[derive(Default)]
pub struct MemoryContentStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    next_id: DbId,
    services: Vec<Service>,
    impact: Vec<ImpactStory>,
    support: Vec<SupportCase>,
    resources: Vec<Resource>,
}

impl Tables {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held in a collection.
    pub async fn count(&self, collection: Collection) -> usize {
        let tables = self.tables.lock().await;
        match collection {
            Collection::Services => tables.services.len(),
            Collection::Impact => tables.impact.len(),
            Collection::Support => tables.support.len(),
            Collection::Resources => tables.resources.len(),
        }
    }
}

fn not_found(collection: Collection, id: DbId) -> StoreError {
    StoreError::NotFound { collection, id }
}

fn check_resource(input: &NewResource) -> Result<(), StoreError> {
    if input.has_matching_url() {
        Ok(())
    } else {
        Err(StoreError::Constraint("ck_resources_url_matches_type".into()))
    }
}

#[async_trait::async_trait]
impl ContentStore for MemoryContentStore {
    async fn create(&self, record: NewRecord) -> Result<DbId, StoreError> {
        if let NewRecord::Resource(input) = &record {
            check_resource(input)?;
        }

        let mut tables = self.tables.lock().await;
        let id = tables.allocate_id();
        let created_at = Utc::now();
        match record {
            NewRecord::Service(input) => tables.services.push(Service {
                id,
                project_name: input.project_name,
                description: input.description,
                image_url: input.image_url,
                created_at,
            }),
            NewRecord::Impact(input) => tables.impact.push(ImpactStory {
                id,
                heading: input.heading,
                description: input.description,
                media_type: input.media_type,
                media_url: input.media_url,
                created_at,
            }),
            NewRecord::Support(input) => tables.support.push(SupportCase {
                id,
                category: input.category.as_str().to_string(),
                name: input.name,
                age: input.age,
                location: input.location,
                story: input.story,
                image_url: input.image_url,
                created_at,
            }),
            NewRecord::Resource(input) => tables.resources.push(Resource {
                id,
                name: input.name,
                description: input.description,
                resource_type: input.resource_type.as_str().to_string(),
                resource_url: input.resource_url,
                document_url: input.document_url,
                thumbnail_url: input.thumbnail_url,
                created_at,
            }),
        }
        Ok(id)
    }

    async fn update(&self, id: DbId, record: NewRecord) -> Result<DbId, StoreError> {
        let collection = record.collection();
        let mut tables = self.tables.lock().await;
        match record {
            NewRecord::Service(input) => tables
                .services
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(|| not_found(collection, id))?
                .apply(input),
            NewRecord::Impact(input) => tables
                .impact
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(|| not_found(collection, id))?
                .apply(input),
            NewRecord::Support(input) => tables
                .support
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(|| not_found(collection, id))?
                .apply(input),
            NewRecord::Resource(input) => {
                let row = tables
                    .resources
                    .iter_mut()
                    .find(|row| row.id == id)
                    .ok_or_else(|| not_found(collection, id))?;
                if !row.apply(input) {
                    return Err(StoreError::Constraint(
                        "ck_resources_url_matches_type".into(),
                    ));
                }
            }
        }
        Ok(id)
    }

    async fn find(&self, collection: Collection, id: DbId) -> Result<Option<Record>, StoreError> {
        let tables = self.tables.lock().await;
        let record = match collection {
            Collection::Services => tables
                .services
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Service),
            Collection::Impact => tables
                .impact
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Impact),
            Collection::Support => tables
                .support
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Support),
            Collection::Resources => tables
                .resources
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .map(Record::Resource),
        };
        Ok(record)
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Record>, StoreError> {
        let tables = self.tables.lock().await;
        // Rows are appended in id order; newest first means reversed.
        let records = match collection {
            Collection::Services => tables
                .services
                .iter()
                .rev()
                .cloned()
                .map(Record::Service)
                .collect(),
            Collection::Impact => tables
                .impact
                .iter()
                .rev()
                .cloned()
                .map(Record::Impact)
                .collect(),
            Collection::Support => tables
                .support
                .iter()
                .rev()
                .cloned()
                .map(Record::Support)
                .collect(),
            Collection::Resources => tables
                .resources
                .iter()
                .rev()
                .cloned()
                .map(Record::Resource)
                .collect(),
        };
        Ok(records)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
