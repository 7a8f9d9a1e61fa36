use super::RecordStore;
use crate::error::RecordError;
use crate::models::CodeProjection;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

pub const COLLECTION: &str = "codes";
pub const PROJECTED_FIELDS: &str = "title,code";

/// PocketBase records API.
pub struct PocketBaseStore {
    client: Client,
    base_url: Url,
}

impl PocketBaseStore {
    pub fn new(base_url: &str) -> Result<Self, RecordError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RecordError::Fetch(format!("invalid PocketBase URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RecordError::Fetch(format!(
                "invalid PocketBase URL {}",
                base_url
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("snipshare/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RecordError::Fetch(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// `{base}/api/collections/codes/records/{id}?fields=title,code`
    pub fn record_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "collections", COLLECTION, "records", id]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("fields", PROJECTED_FIELDS);
        url
    }
}

fn is_dot_segment(id: &str) -> bool {
    matches!(id, "." | "..")
}

#[async_trait]
impl RecordStore for PocketBaseStore {
    async fn fetch_projection(&self, id: &str) -> Result<CodeProjection, RecordError> {
        // Dot segments would be dropped from the path and address the collection itself.
        if is_dot_segment(id) {
            return Err(RecordError::NotFound(id.to_string()));
        }

        let url = self.record_url(id);
        debug!(%url, "fetching code record");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(id, error = %e, "PocketBase request failed");
            RecordError::Fetch(e.to_string())
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(RecordError::NotFound(id.to_string())),
            status if status.is_success() => response
                .json::<CodeProjection>()
                .await
                .map_err(|e| RecordError::Fetch(format!("malformed record {}: {}", id, e))),
            status => {
                warn!(id, %status, "PocketBase returned an error");
                Err(RecordError::Fetch(format!("PocketBase returned status {}", status)))
            }
        }
    }
}
