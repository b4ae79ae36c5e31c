//! The admin form workflow.
//!
//! One generic [`FormWorkflow`] drives every content type. A [`FormKind`]
//! supplies the per-type configuration: which draft it edits, which files go
//! to which upload route, and how a validated draft maps onto a record.
//!
//! Submission is strictly ordered: validate, upload every attached file in
//! field order, then create or update the record. A failure at any step stops
//! the submission and leaves the draft populated. Blobs uploaded before a
//! failed write are not deleted.

mod forms;

use std::collections::HashMap;
use std::sync::Arc;

use outreach_core::content::{Collection, Draft, Intent, LocalFile};
use outreach_core::error::ValidationError;
use outreach_core::types::DbId;
use outreach_core::upload::{BlobUploader, UploadError, UploadRoute, UploadedFile};
use outreach_db::models::NewRecord;
use outreach_db::store::{ContentStore, StoreError};

pub use forms::{ImpactForm, ResourceForm, ServiceForm, SupportForm};

/// A file on the draft bound for an upload route.
#[derive(Debug)]
pub struct UploadField<'a> {
    /// Wire name of the file input.
    pub field: &'static str,
    pub route: UploadRoute,
    pub file: &'a LocalFile,
}

/// Upload results keyed by file input.
#[derive(Debug, Default)]
pub struct Uploaded {
    files: HashMap<&'static str, UploadedFile>,
}

impl Uploaded {
    pub fn url(&self, field: &str) -> Option<String> {
        self.files.get(field).map(|f| f.url.clone())
    }

    pub fn keys(&self) -> Vec<String> {
        self.files.values().map(|f| f.key.clone()).collect()
    }

    fn insert(&mut self, field: &'static str, file: UploadedFile) {
        self.files.insert(field, file);
    }
}

/// Per-type configuration of the workflow.
pub trait FormKind: Send + Sync + 'static {
    type Draft: Draft;

    const COLLECTION: Collection;

    /// Files to upload, in field order. Files irrelevant to the draft's
    /// current type selection are left out.
    fn upload_fields(draft: &Self::Draft) -> Vec<UploadField<'_>>;

    /// Map a validated draft plus upload results onto a record.
    fn into_record(draft: &Self::Draft, uploaded: &Uploaded) -> Result<NewRecord, ValidationError>;

    /// e.g. "Service created successfully!"
    fn success_message(target: Target) -> String {
        format!(
            "{} {} successfully!",
            capitalize(Self::COLLECTION.label()),
            target.past_tense()
        )
    }
}

/// What a submission writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Create,
    Update(DbId),
}

impl Target {
    pub fn intent(self) -> Intent {
        match self {
            Target::Create => Intent::Create,
            Target::Update(_) => Intent::Update,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Target::Create => "create",
            Target::Update(_) => "update",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Target::Create => "created",
            Target::Update(_) => "updated",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Upload of {field} failed: {source}")]
    Upload {
        field: &'static str,
        source: UploadError,
    },

    #[error("Failed to {verb} {collection} record: {source}")]
    Persist {
        collection: Collection,
        verb: &'static str,
        /// Storage keys uploaded for this submission and now unreferenced.
        orphaned: Vec<String>,
        source: StoreError,
    },
}

impl SubmitError {
    /// The user-facing message shown as a toast.
    pub fn toast(&self) -> String {
        match self {
            SubmitError::Validation(err) => err.message.clone(),
            SubmitError::Upload { field, source } => match source {
                UploadError::Service(_) => {
                    format!("Failed to upload {field}. Please try again.")
                }
                rejected => format!("Failed to upload {field}: {rejected}"),
            },
            SubmitError::Persist {
                collection, verb, ..
            } => format!("Failed to {verb} {}. Please try again.", collection.label()),
        }
    }
}

/// One form instance: a draft plus the injected collaborators.
pub struct FormWorkflow<K: FormKind> {
    draft: K::Draft,
    store: Arc<dyn ContentStore>,
    uploader: Arc<dyn BlobUploader>,
}

impl<K: FormKind> FormWorkflow<K> {
    pub fn new(store: Arc<dyn ContentStore>, uploader: Arc<dyn BlobUploader>) -> Self {
        Self::with_draft(K::Draft::default(), store, uploader)
    }

    pub fn with_draft(
        draft: K::Draft,
        store: Arc<dyn ContentStore>,
        uploader: Arc<dyn BlobUploader>,
    ) -> Self {
        Self {
            draft,
            store,
            uploader,
        }
    }

    pub fn draft(&self) -> &K::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut K::Draft {
        &mut self.draft
    }

    pub fn validate(&self, target: Target) -> Result<(), ValidationError> {
        self.draft.validate(target.intent())
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self, target: Target) -> bool {
        self.draft.is_valid(target.intent())
    }

    /// Validate, upload, then persist. Resets the draft only on success.
    pub async fn submit(&mut self, target: Target) -> Result<DbId, SubmitError> {
        let collection = K::COLLECTION;

        if let Err(err) = self.validate(target) {
            tracing::debug!(%collection, field = %err.field, "Draft rejected by validation");
            return Err(err.into());
        }

        let mut uploaded = Uploaded::default();
        for UploadField { field, route, file } in K::upload_fields(&self.draft) {
            tracing::debug!(%collection, field, %route, size = file.size(), "Uploading file");
            match self.uploader.upload(file, route).await {
                Ok(result) => {
                    tracing::info!(%collection, field, key = %result.key, "Upload complete");
                    uploaded.insert(field, result);
                }
                Err(source) => {
                    tracing::warn!(%collection, field, error = %source, "Upload failed");
                    let orphaned = uploaded.keys();
                    if !orphaned.is_empty() {
                        tracing::warn!(%collection, ?orphaned, "Earlier uploads left unreferenced");
                    }
                    return Err(SubmitError::Upload { field, source });
                }
            }
        }

        let record = K::into_record(&self.draft, &uploaded)?;
        let result = match target {
            Target::Create => self.store.create(record).await,
            Target::Update(id) => self.store.update(id, record).await,
        };

        match result {
            Ok(id) => {
                tracing::info!(%collection, id, action = target.verb(), "Record saved");
                self.draft = K::Draft::default();
                Ok(id)
            }
            Err(source) => {
                let orphaned = uploaded.keys();
                tracing::warn!(
                    %collection,
                    error = %source,
                    ?orphaned,
                    "Persist failed; uploaded blobs are orphaned"
                );
                Err(SubmitError::Persist {
                    collection,
                    verb: target.verb(),
                    orphaned,
                    source,
                })
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
