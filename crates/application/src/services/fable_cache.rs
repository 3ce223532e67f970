//! Best-effort view over the fable cache port
//!
//! Wraps [`FableCachePort`] so that store failures surface as tagged outcomes
//! instead of errors. Every call is a single attempt.

use std::{fmt, sync::Arc};

use domain::{CacheKey, FableRequest};
use tracing::{debug, warn};

use crate::ports::{CacheStats, FableCachePort};

/// Outcome of a cache lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// A fable was stored under the key
    Hit(String),
    /// Nothing stored under the key
    Miss,
    /// The lookup failed; callers treat this as a miss
    Degraded { reason: String },
}

impl CacheLookup {
    /// The cached fable, if this was a hit
    pub fn into_hit(self) -> Option<String> {
        match self {
            Self::Hit(fable) => Some(fable),
            Self::Miss | Self::Degraded { .. } => None,
        }
    }
}

/// Outcome of a cache write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheWrite {
    /// The fable was persisted
    Stored,
    /// The write failed and was dropped
    Degraded { reason: String },
}

impl CacheWrite {
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Stored)
    }
}

/// Fable cache with degradation semantics
#[derive(Clone)]
pub struct FableCache {
    port: Arc<dyn FableCachePort>,
}

impl fmt::Debug for FableCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FableCache").finish_non_exhaustive()
    }
}

impl FableCache {
    /// Wrap a cache port
    pub fn new(port: Arc<dyn FableCachePort>) -> Self {
        Self { port }
    }

    /// Whether the backing store answers
    pub async fn is_available(&self) -> bool {
        self.port.probe_availability().await
    }

    /// Look up a fable, folding errors into [`CacheLookup::Degraded`]
    pub async fn lookup(&self, key: &CacheKey) -> CacheLookup {
        match self.port.lookup(key).await {
            Ok(Some(fable)) => {
                debug!(cache_key = %key, "Cache hit");
                CacheLookup::Hit(fable)
            },
            Ok(None) => {
                debug!(cache_key = %key, "Cache miss");
                CacheLookup::Miss
            },
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Cache lookup failed, treating as miss");
                CacheLookup::Degraded {
                    reason: e.to_string(),
                }
            },
        }
    }

    /// Store a fable, folding errors into [`CacheWrite::Degraded`]
    pub async fn store(&self, key: &CacheKey, fable: &str, request: &FableRequest) -> CacheWrite {
        match self.port.store(key, fable, request).await {
            Ok(()) => {
                debug!(cache_key = %key, "Fable cached");
                CacheWrite::Stored
            },
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Failed to cache fable");
                CacheWrite::Degraded {
                    reason: e.to_string(),
                }
            },
        }
    }

    /// Cache statistics, empty when the store cannot be queried
    pub async fn stats(&self) -> CacheStats {
        match self.port.stats().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "Failed to read cache statistics");
                CacheStats::empty()
            },
        }
    }

    /// Underlying port for operations without degradation semantics
    pub fn port(&self) -> &Arc<dyn FableCachePort> {
        &self.port
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{error::ApplicationError, ports::MockFableCachePort};

    fn request() -> FableRequest {
        FableRequest::new("Lion", "Mouse", "Jungle", "Be kind", "no").unwrap()
    }

    #[tokio::test]
    async fn lookup_hit() {
        let key = request().cache_key();
        let mut mock = MockFableCachePort::new();
        mock.expect_lookup()
            .with(eq(key.clone()))
            .times(1)
            .returning(|_| Ok(Some("cached fable".to_string())));

        let cache = FableCache::new(Arc::new(mock));
        assert_eq!(
            cache.lookup(&key).await,
            CacheLookup::Hit("cached fable".to_string())
        );
    }

    #[tokio::test]
    async fn lookup_miss() {
        let mut mock = MockFableCachePort::new();
        mock.expect_lookup().returning(|_| Ok(None));

        let cache = FableCache::new(Arc::new(mock));
        assert_eq!(cache.lookup(&request().cache_key()).await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn lookup_error_is_degraded() {
        let mut mock = MockFableCachePort::new();
        mock.expect_lookup()
            .returning(|_| Err(ApplicationError::ExternalService("timeout".into())));

        let cache = FableCache::new(Arc::new(mock));
        let outcome = cache.lookup(&request().cache_key()).await;
        assert!(matches!(outcome, CacheLookup::Degraded { ref reason } if reason.contains("timeout")));
        assert!(outcome.into_hit().is_none());
    }

    #[tokio::test]
    async fn store_error_is_degraded() {
        let mut mock = MockFableCachePort::new();
        mock.expect_store()
            .times(1)
            .returning(|_, _, _| Err(ApplicationError::ExternalService("offline".into())));

        let cache = FableCache::new(Arc::new(mock));
        let request = request();
        let outcome = cache.store(&request.cache_key(), "text", &request).await;
        assert!(!outcome.is_stored());
    }

    #[tokio::test]
    async fn store_success() {
        let mut mock = MockFableCachePort::new();
        mock.expect_store()
            .withf(|_, fable, request| fable == "text" && request.character1() == "Lion")
            .returning(|_, _, _| Ok(()));

        let cache = FableCache::new(Arc::new(mock));
        let request = request();
        assert!(cache.store(&request.cache_key(), "text", &request).await.is_stored());
    }

    #[tokio::test]
    async fn stats_error_yields_empty() {
        let mut mock = MockFableCachePort::new();
        mock.expect_stats()
            .returning(|| Err(ApplicationError::ExternalService("offline".into())));

        let cache = FableCache::new(Arc::new(mock));
        assert_eq!(cache.stats().await, CacheStats::empty());
    }
}
