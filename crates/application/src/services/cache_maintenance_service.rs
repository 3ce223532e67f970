//! Cache maintenance - statistics and age-based eviction

use std::{fmt, sync::Arc};

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{CacheStats, FableCachePort},
    services::fable_cache::FableCache,
};

/// Default retention for cached fables in days
pub const DEFAULT_MAX_AGE_DAYS: u32 = 30;

/// Result of an eviction sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvictionReport {
    /// Retention window that was applied
    pub max_age_days: u32,
    /// Number of entries deleted
    pub deleted: u64,
}

impl EvictionReport {
    /// Human-readable summary
    pub fn message(&self) -> String {
        format!(
            "Successfully cleaned cache entries older than {} days",
            self.max_age_days
        )
    }
}

/// Service for inspecting and pruning the fable cache
pub struct CacheMaintenanceService {
    cache: FableCache,
    default_max_age_days: u32,
}

impl fmt::Debug for CacheMaintenanceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheMaintenanceService")
            .field("default_max_age_days", &self.default_max_age_days)
            .finish_non_exhaustive()
    }
}

impl CacheMaintenanceService {
    /// Create a service with the default retention window
    pub fn new(cache: Arc<dyn FableCachePort>) -> Self {
        Self {
            cache: FableCache::new(cache),
            default_max_age_days: DEFAULT_MAX_AGE_DAYS,
        }
    }

    /// Override the retention window used when none is given
    #[must_use]
    pub const fn with_default_max_age(mut self, days: u32) -> Self {
        self.default_max_age_days = days;
        self
    }

    pub const fn default_max_age_days(&self) -> u32 {
        self.default_max_age_days
    }

    /// Cache statistics; empty when the store cannot be queried
    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Delete entries older than `max_age_days` (or the default)
    #[instrument(skip(self))]
    pub async fn evict(&self, max_age_days: Option<u32>) -> Result<EvictionReport, ApplicationError> {
        let max_age_days = max_age_days.unwrap_or(self.default_max_age_days);
        let deleted = self.cache.port().evict_older_than(max_age_days).await?;

        info!(max_age_days, deleted, "Evicted stale cache entries");

        Ok(EvictionReport {
            max_age_days,
            deleted,
        })
    }
}
