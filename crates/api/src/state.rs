use std::sync::Arc;

use outreach_core::upload::BlobUploader;
use outreach_db::store::ContentStore;

use crate::config::ServerConfig;
use crate::workflow::{FormKind, FormWorkflow};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store and uploader are constructed once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<dyn ContentStore>,
    pub uploader: Arc<dyn BlobUploader>,
}

impl AppState {
    /// A fresh form with an empty draft, wired to the shared collaborators.
    pub fn workflow<K: FormKind>(&self) -> FormWorkflow<K> {
        FormWorkflow::new(Arc::clone(&self.store), Arc::clone(&self.uploader))
    }
}
