//! Fable cache port
//!
//! Persistent key-value store for generated fables, keyed by [`CacheKey`].
//! Implementations may talk to a hosted REST table or an embedded database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{CacheKey, FableRequest};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Aggregate statistics over the cache table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of stored entries
    pub total_entries: u64,
    /// Creation time of the oldest entry, if any
    pub oldest_entry: Option<DateTime<Utc>>,
}

impl CacheStats {
    /// Statistics for an empty or unreachable cache
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_entries: 0,
            oldest_entry: None,
        }
    }

    /// Whether the cache holds no entries
    pub const fn is_empty(&self) -> bool {
        self.total_entries == 0
    }
}

/// Port for the fable cache store
///
/// Every operation is a single attempt. Callers decide how to degrade.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FableCachePort: Send + Sync {
    /// Cheap connectivity check
    ///
    /// Returns `false` when the store is unconfigured or unreachable. Never errors.
    async fn probe_availability(&self) -> bool;

    /// Fetch the stored fable for a key
    async fn lookup(&self, key: &CacheKey) -> Result<Option<String>, ApplicationError>;

    /// Insert or overwrite the fable for a key
    ///
    /// Storing the same key twice leaves exactly one entry holding the latest
    /// text and a refreshed creation time.
    async fn store(
        &self,
        key: &CacheKey,
        fable: &str,
        request: &FableRequest,
    ) -> Result<(), ApplicationError>;

    /// Delete entries created strictly before `now - max_age_days`
    ///
    /// Returns the number of deleted entries when the backend reports it.
    async fn evict_older_than(&self, max_age_days: u32) -> Result<u64, ApplicationError>;

    /// Count entries and find the oldest one
    async fn stats(&self) -> Result<CacheStats, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats() {
        let stats = CacheStats::empty();
        assert!(stats.is_empty());
        assert!(stats.oldest_entry.is_none());
        assert_eq!(stats, CacheStats::default());
    }

    #[tokio::test]
    async fn mock_port_is_usable_as_trait_object() {
        let mut mock = MockFableCachePort::new();
        mock.expect_probe_availability().returning(|| true);
        mock.expect_stats().returning(|| {
            Ok(CacheStats {
                total_entries: 3,
                oldest_entry: None,
            })
        });

        let port: &dyn FableCachePort = &mock;
        assert!(port.probe_availability().await);
        assert_eq!(port.stats().await.unwrap().total_entries, 3);
    }
}
