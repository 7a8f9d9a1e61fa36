//! Minimal client for a running snipshare server.

use reqwest::{Client, StatusCode};
use snipshare_core::{CreateRequest, CreateResponse, Result, ShareError, Snippet, SnipshareError};

pub struct ShareClient {
    client: Client,
    base_url: String,
}

impl ShareClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("snipshare-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/share", self.base_url)
    }

    /// Upload `code` and return the new snippet id
    pub async fn create(&self, code: String) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&CreateRequest { code })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }
        Ok(response.json::<CreateResponse>().await?.id)
    }

    /// Download the snippet stored under `id`
    pub async fn fetch(&self, id: &str) -> Result<Snippet> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("id", id)])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ShareError::NotFound(id.to_string()).into()),
            StatusCode::BAD_REQUEST => Err(ShareError::MissingId.into()),
            status if status.is_success() => Ok(response.json::<Snippet>().await?),
            _ => Err(server_error(response).await),
        }
    }
}

async fn server_error(response: reqwest::Response) -> SnipshareError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    SnipshareError::Other(format!("server returned {}: {}", status, body.trim()))
}
