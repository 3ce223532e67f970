//! HTTP client for a running Fabulist server

use std::time::Duration;

use presentation_http::{
    error::ErrorResponse,
    handlers::{
        cache::{CacheStatsResponse, CleanCacheResponse},
        fable::{GenerateFableBody, GenerateFableResponse},
        health::{HealthResponse, ReadinessResponse},
    },
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors talking to the server
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Thin typed wrapper over the server's HTTP API
#[derive(Debug, Clone)]
pub struct FabulistClient {
    http: Client,
    base_url: String,
}

impl FabulistClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Server responded");

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(err) => match err.details {
                Some(details) => format!("{} ({details})", err.error),
                None => err.error,
            },
            Err(_) => text,
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn generate(
        &self,
        body: &GenerateFableBody,
    ) -> Result<GenerateFableResponse, ClientError> {
        self.send(self.http.post(self.endpoint_url("/generate")).json(body))
            .await
    }

    pub async fn cache_stats(&self) -> Result<CacheStatsResponse, ClientError> {
        self.send(self.http.get(self.endpoint_url("/cache/stats")))
            .await
    }

    pub async fn clean_cache(
        &self,
        max_age_days: Option<u32>,
    ) -> Result<CleanCacheResponse, ClientError> {
        let mut request = self.http.delete(self.endpoint_url("/cache"));
        if let Some(days) = max_age_days {
            request = request.query(&[("maxAge", days)]);
        }
        self.send(request).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.send(self.http.get(self.endpoint_url("/health"))).await
    }

    pub async fn ready(&self) -> Result<ReadinessResponse, ClientError> {
        self.send(self.http.get(self.endpoint_url("/ready"))).await
    }
}
