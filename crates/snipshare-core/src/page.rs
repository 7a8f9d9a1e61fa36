//! Data for the share page, read from the durable store.

use crate::error::PageError;
use crate::models::PageData;
use crate::records::RecordStore;
use std::sync::Arc;
use tracing::debug;

pub struct PageLoader {
    records: Arc<dyn RecordStore>,
    public_url: String,
}

impl PageLoader {
    pub fn new(records: Arc<dyn RecordStore>, public_url: impl Into<String>) -> Self {
        let public_url = public_url.into().trim_end_matches('/').to_string();
        Self {
            records,
            public_url,
        }
    }

    /// Public address of the share page for `id`. Not stored anywhere; it is
    /// rebuilt on every read.
    pub fn share_url(&self, id: &str) -> String {
        format!("{}/share/{}", self.public_url, id)
    }

    pub async fn load(&self, id: &str) -> Result<PageData, PageError> {
        if id.is_empty() {
            return Err(PageError::MissingId);
        }

        let projection = self.records.fetch_projection(id).await?;
        debug!(id, "loaded share page data");

        Ok(PageData {
            title: projection.title,
            code: projection.code,
            url: self.share_url(id),
        })
    }
}
