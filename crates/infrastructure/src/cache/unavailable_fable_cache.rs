//! Cache backend used when no store is configured

use application::{
    error::ApplicationError,
    ports::{CacheStats, FableCachePort},
};
use async_trait::async_trait;
use domain::{CacheKey, FableRequest};

/// A cache that is never available
///
/// The probe reports `false`, so the pipeline skips every other call; direct
/// callers receive an error naming the reason.
#[derive(Debug, Clone)]
pub struct UnavailableFableCache {
    reason: String,
}

impl UnavailableFableCache {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> ApplicationError {
        ApplicationError::ExternalService(format!("Fable cache unavailable: {}", self.reason))
    }
}

#[async_trait]
impl FableCachePort for UnavailableFableCache {
    async fn probe_availability(&self) -> bool {
        false
    }

    async fn lookup(&self, _key: &CacheKey) -> Result<Option<String>, ApplicationError> {
        Err(self.error())
    }

    async fn store(
        &self,
        _key: &CacheKey,
        _fable: &str,
        _request: &FableRequest,
    ) -> Result<(), ApplicationError> {
        Err(self.error())
    }

    async fn evict_older_than(&self, _max_age_days: u32) -> Result<u64, ApplicationError> {
        Err(self.error())
    }

    async fn stats(&self) -> Result<CacheStats, ApplicationError> {
        Err(self.error())
    }
}
