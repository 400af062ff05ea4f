use std::sync::Arc;

use crate::config::Config;
use crate::documents::repository::DocumentStore;
use crate::documents::storage::UploadStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document metadata. Default: PgDocumentStore.
    pub documents: Arc<dyn DocumentStore>,
    pub storage: UploadStorage,
    pub config: Config,
}
