//! Create and fetch snippets in the ephemeral store.

use crate::config::DEFAULT_TTL_SECS;
use crate::error::ShareError;
use crate::kv::KvStore;
use crate::models::{Snippet, SnippetId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

pub const DEFAULT_TTL: Duration = Duration::from_secs(DEFAULT_TTL_SECS);

pub struct ShareService {
    store: Arc<dyn KvStore>,
    ttl: Duration,
}

impl ShareService {
    pub fn new(store: Arc<dyn KvStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `code` under a freshly generated id and return the id.
    ///
    /// Ids are never reused, so this never overwrites an existing snippet.
    pub async fn create(&self, code: String) -> Result<SnippetId, ShareError> {
        let id = SnippetId::generate();
        let payload = serde_json::to_string(&Snippet::new(code)).map_err(ShareError::Encode)?;

        self.store.put(&id.to_string(), payload, self.ttl).await?;
        debug!(%id, ttl_secs = self.ttl.as_secs(), "stored snippet");

        Ok(id)
    }

    /// Look up a snippet.
    ///
    /// A missing or empty id is `MissingId`, an absent, expired or empty
    /// record is `NotFound`, and a record that does not decode to an object with a
    /// textual `code` is `Corrupt`.
    pub async fn fetch(&self, id: Option<&str>) -> Result<Snippet, ShareError> {
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ShareError::MissingId),
        };

        let stored = self.store.get(id).await?.filter(|raw| !raw.is_empty());
        let Some(raw) = stored else {
            debug!(id, "snippet not found");
            return Err(ShareError::NotFound(id.to_string()));
        };

        serde_json::from_str::<Snippet>(&raw).map_err(|source| {
            error!(id, error = %source, "error parsing stored snippet");
            ShareError::Corrupt {
                id: id.to_string(),
                source,
            }
        })
    }
}
