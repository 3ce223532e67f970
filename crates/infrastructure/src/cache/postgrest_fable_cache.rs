//! Fable cache over a PostgREST (Supabase) table
//!
//! Every call is a single HTTP request with the service key sent both as
//! `apikey` and as a bearer token. Upserts rely on the unique `cache_key`
//! column; counts come from the `Content-Range` header.

use application::{
    error::ApplicationError,
    ports::{CacheStats, FableCachePort},
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{CacheEntry, CacheKey, FableRequest};
use reqwest::{Client, RequestBuilder, Response, header::HeaderMap};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::CacheConfig;

/// PostgREST-backed fable cache
pub struct PostgrestFableCache {
    client: Client,
    table_url: String,
    service_key: SecretString,
}

impl std::fmt::Debug for PostgrestFableCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestFableCache")
            .field("table_url", &self.table_url)
            .field("service_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct FableContentRow {
    fable_content: String,
}

#[derive(Debug, Deserialize)]
struct CreatedAtRow {
    created_at: DateTime<Utc>,
}

impl PostgrestFableCache {
    /// Create a cache client from configuration
    ///
    /// Fails when the endpoint URL or the service key is missing.
    pub fn new(config: &CacheConfig) -> Result<Self, ApplicationError> {
        let base_url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ApplicationError::Configuration("cache.url is not set".to_string()))?;

        let service_key = config
            .service_key
            .clone()
            .filter(|k| !k.expose_secret().trim().is_empty())
            .ok_or_else(|| {
                ApplicationError::Configuration("cache.service_key is not set".to_string())
            })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApplicationError::Configuration(format!("HTTP client: {e}")))?;

        let table_url = format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            config.rest_path.trim_matches('/'),
            config.table
        );

        info!(table_url = %table_url, "Initialized PostgREST fable cache");

        Ok(Self {
            client,
            table_url,
            service_key,
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let key = self.service_key.expose_secret();
        builder.header("apikey", key).bearer_auth(key)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApplicationError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApplicationError::ExternalService(format!(
                "Cache store returned {status}: {body}"
            )))
        }
    }

    fn format_timestamp(ts: DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Delete every entry created strictly before `cutoff`
    pub async fn evict_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, ApplicationError> {
        let request = self
            .client
            .delete(&self.table_url)
            .query(&[("created_at", format!("lt.{}", Self::format_timestamp(cutoff)))])
            .header("Prefer", "count=exact,return=minimal");

        let response = self.send(request).await?;
        let deleted = parse_content_range_total(response.headers()).unwrap_or(0);

        debug!(deleted, cutoff = %cutoff, "Evicted entries");
        Ok(deleted)
    }
}

/// Parse the total from a `Content-Range` header such as `0-0/42` or `*/0`
fn parse_content_range_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::CONTENT_RANGE)?
        .to_str()
        .ok()?
        .rsplit_once('/')?
        .1
        .parse()
        .ok()
}

fn map_reqwest_error(e: reqwest::Error) -> ApplicationError {
    if e.is_timeout() {
        ApplicationError::ExternalService(format!("Cache store timed out: {e}"))
    } else {
        ApplicationError::ExternalService(format!("Cache store request failed: {e}"))
    }
}

fn map_decode_error(e: reqwest::Error) -> ApplicationError {
    ApplicationError::ExternalService(format!("Unexpected cache store response: {e}"))
}

#[async_trait]
impl FableCachePort for PostgrestFableCache {
    async fn probe_availability(&self) -> bool {
        let request = self
            .client
            .get(&self.table_url)
            .query(&[("select", "cache_key"), ("limit", "1")]);

        match self.send(request).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "PostgREST fable cache not available");
                false
            },
        }
    }

    #[instrument(skip(self), fields(cache_key = %key))]
    async fn lookup(&self, key: &CacheKey) -> Result<Option<String>, ApplicationError> {
        let request = self.client.get(&self.table_url).query(&[
            ("select", "fable_content".to_string()),
            ("cache_key", format!("eq.{key}")),
            ("limit", "1".to_string()),
        ]);

        let rows: Vec<FableContentRow> = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(map_decode_error)?;

        let fable = rows.into_iter().next().map(|row| row.fable_content);
        debug!(hit = fable.is_some(), "Cache lookup");
        Ok(fable)
    }

    #[instrument(skip(self, fable, request), fields(cache_key = %key))]
    async fn store(
        &self,
        key: &CacheKey,
        fable: &str,
        request: &FableRequest,
    ) -> Result<(), ApplicationError> {
        let entry = CacheEntry::new(key.clone(), fable, request, Utc::now());

        let request = self
            .client
            .post(&self.table_url)
            .query(&[("on_conflict", "cache_key")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&entry);

        self.send(request).await?;
        debug!("Fable stored");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn evict_older_than(&self, max_age_days: u32) -> Result<u64, ApplicationError> {
        let Some(cutoff) = CacheEntry::eviction_cutoff(Utc::now(), max_age_days) else {
            debug!("Retention window predates every entry, nothing evicted");
            return Ok(0);
        };
        self.evict_created_before(cutoff).await
    }

    async fn stats(&self) -> Result<CacheStats, ApplicationError> {
        let request = self
            .client
            .get(&self.table_url)
            .query(&[
                ("select", "created_at"),
                ("order", "created_at.asc"),
                ("limit", "1"),
            ])
            .header("Prefer", "count=exact");

        let response = self.send(request).await?;
        let total_entries = parse_content_range_total(response.headers()).unwrap_or(0);
        let rows: Vec<CreatedAtRow> = response.json().await.map_err(map_decode_error)?;

        Ok(CacheStats {
            total_entries,
            oldest_entry: rows.into_iter().next().map(|row| row.created_at),
        })
    }
}
