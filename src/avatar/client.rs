//! DiceBear HTTP client

use super::{AvatarFetcher, AvatarRequest, FetchError};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches rendered avatars from a DiceBear-compatible HTTP API.
pub struct DicebearClient {
    client: Client,
    base_url: String,
}

impl DicebearClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AvatarFetcher for DicebearClient {
    async fn fetch(&self, request: &AvatarRequest) -> Result<Bytes, FetchError> {
        let url = request.url(&self.base_url)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::network(format!("request timeout: {e}"))
            } else if e.is_connect() {
                FetchError::network(format!("connection failed: {e}"))
            } else {
                FetchError::network(format!("request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("failed to read response body: {e}")))
    }
}
