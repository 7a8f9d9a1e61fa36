use super::KvStore;
use crate::error::StoreError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

/// Cloudflare Workers KV namespace reached through the REST API.
pub struct CloudflareKv {
    client: Client,
    api_base: String,
    account_id: String,
    namespace_id: String,
    api_token: String,
}

impl CloudflareKv {
    pub fn new(
        api_base: impl Into<String>,
        account_id: impl Into<String>,
        namespace_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent(concat!("snipshare/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            account_id: account_id.into(),
            namespace_id: namespace_id.into(),
            api_token: api_token.into(),
        })
    }

    fn value_url(&self, key: &str) -> Result<Url, StoreError> {
        if matches!(key, "" | "." | "..") {
            return Err(StoreError::Endpoint(format!("unaddressable key {:?}", key)));
        }
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| StoreError::Endpoint(format!("{}: {}", self.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Endpoint(self.api_base.clone()))?
            .pop_if_empty()
            .extend([
                "accounts",
                self.account_id.as_str(),
                "storage",
                "kv",
                "namespaces",
                self.namespace_id.as_str(),
                "values",
                key,
            ]);
        Ok(url)
    }
}

#[async_trait]
impl KvStore for CloudflareKv {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError> {
        let url = self.value_url(key)?;
        let response = self
            .client
            .put(url)
            .query(&[("expiration_ttl", ttl.as_secs())])
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(value)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                key: key.to_string(),
            });
        }
        debug!(key, ttl_secs = ttl.as_secs(), "wrote value to cloudflare kv");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if matches!(key, "" | "." | "..") {
            return Ok(None);
        }

        let url = self.value_url(key)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.text().await?)),
            status => Err(StoreError::Status {
                status: status.as_u16(),
                key: key.to_string(),
            }),
        }
    }
}
