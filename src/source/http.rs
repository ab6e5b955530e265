use std::fmt::Display;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{FetchError, RemoteSource};
use crate::config::RemoteConfig;
use crate::model::Record;

/// JSON-over-HTTP source: `GET {base_url}{endpoint}` returns the collection.
pub struct HttpSource {
    client: Client,
    base_url: String,
    endpoint: String,
    timeout_seconds: u64,
}

impl HttpSource {
    pub fn new(config: &RemoteConfig) -> Result<Self, FetchError> {
        let timeout_seconds = u64::from(config.timeout_seconds);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoint: config.endpoint.clone(),
            timeout_seconds,
        })
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint)
    }

    /// Fetch a single record: `GET {endpoint}/{id}`.
    pub async fn fetch_one<R: DeserializeOwned>(&self, id: impl Display) -> Result<R, FetchError> {
        let url = format!("{}/{}", self.collection_url().trim_end_matches('/'), id);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(url = %url, "Fetching remote resource");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Remote returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_seconds)
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl<R: Record> RemoteSource<R> for HttpSource {
    async fn fetch_all(&self) -> Result<Vec<R>, FetchError> {
        let records: Vec<R> = self.get_json(&self.collection_url()).await?;
        tracing::debug!(count = records.len(), "Fetched remote collection");
        Ok(records)
    }
}
