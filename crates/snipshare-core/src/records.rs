//! Read access to the durable `codes` collection.

mod file;
mod pocketbase;

pub use file::FileRecordStore;
pub use pocketbase::{PocketBaseStore, COLLECTION, PROJECTED_FIELDS};

use crate::config::RecordBackend;
use crate::error::RecordError;
use crate::models::CodeProjection;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of durable code records, projected to `{title, code}`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_projection(&self, id: &str) -> Result<CodeProjection, RecordError>;
}

/// Build the record store named by the configuration.
pub fn open_record_store(backend: &RecordBackend) -> Result<Arc<dyn RecordStore>, RecordError> {
    let store: Arc<dyn RecordStore> = match backend {
        RecordBackend::PocketBase { base_url } => Arc::new(PocketBaseStore::new(base_url)?),
        RecordBackend::File { path } => Arc::new(FileRecordStore::new(path)),
    };
    Ok(store)
}
