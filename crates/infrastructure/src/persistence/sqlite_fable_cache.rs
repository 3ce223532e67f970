//! Embedded fable cache using sqlx with SQLite
//!
//! Timestamps are stored as RFC 3339 text in UTC with a fixed precision so
//! that lexical order matches chronological order.

use application::{
    error::ApplicationError,
    ports::{CacheStats, FableCachePort},
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{CacheEntry, CacheKey, FableRequest};
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

use super::error::map_sqlx_error;

/// SQLite-backed fable cache
#[derive(Debug, Clone)]
pub struct SqliteFableCache {
    pool: SqlitePool,
}

impl SqliteFableCache {
    /// Create a new cache over an already migrated pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn format_timestamp(ts: DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ApplicationError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ApplicationError::Internal(format!("Invalid timestamp: {e}")))
    }

    /// Insert an entry with an explicit creation time
    pub async fn insert_entry(&self, entry: &CacheEntry) -> Result<(), ApplicationError> {
        sqlx::query(
            r"
            INSERT INTO fable_cache
                (cache_key, fable_content, character1, character2, setting, moral, style_mode, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT(cache_key) DO UPDATE SET
                fable_content = excluded.fable_content,
                character1 = excluded.character1,
                character2 = excluded.character2,
                setting = excluded.setting,
                moral = excluded.moral,
                style_mode = excluded.style_mode,
                created_at = excluded.created_at
            ",
        )
        .bind(entry.cache_key.as_str())
        .bind(&entry.fable_content)
        .bind(&entry.character1)
        .bind(&entry.character2)
        .bind(&entry.setting)
        .bind(&entry.moral)
        .bind(&entry.style_mode)
        .bind(Self::format_timestamp(entry.created_at))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    /// Delete every entry created strictly before `cutoff`
    pub async fn evict_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, ApplicationError> {
        let result = sqlx::query("DELETE FROM fable_cache WHERE created_at < $1")
            .bind(Self::format_timestamp(cutoff))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(deleted = result.rows_affected(), cutoff = %cutoff, "Evicted entries");
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl FableCachePort for SqliteFableCache {
    async fn probe_availability(&self) -> bool {
        match sqlx::query("SELECT cache_key FROM fable_cache LIMIT 1")
            .fetch_optional(&self.pool)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "SQLite fable cache not available");
                false
            },
        }
    }

    #[instrument(skip(self), fields(cache_key = %key))]
    async fn lookup(&self, key: &CacheKey) -> Result<Option<String>, ApplicationError> {
        let fable: Option<String> =
            sqlx::query_scalar("SELECT fable_content FROM fable_cache WHERE cache_key = $1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

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
        self.insert_entry(&entry).await?;
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
        let (count, oldest): (i64, Option<String>) =
            sqlx::query_as("SELECT COUNT(*), MIN(created_at) FROM fable_cache")
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(CacheStats {
            total_entries: u64::try_from(count).unwrap_or(0),
            oldest_entry: oldest.as_deref().map(Self::parse_timestamp).transpose()?,
        })
    }
}
