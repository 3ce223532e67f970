//! Fable service - generate-or-serve-from-cache pipeline
//!
//! Flow per request: derive the cache key once, probe the cache, return a hit
//! directly, otherwise generate (remote when allowed, fallback otherwise) and
//! store the result best-effort. Only invalid input ever fails; every other
//! fault degrades to a fallback fable.

use std::{fmt, panic::AssertUnwindSafe, sync::Arc};

use domain::{FableRequest, GeneratedFable};
use futures::FutureExt;
use tracing::{error, info, instrument, warn};

use crate::{
    ports::{FableCachePort, RemoteGeneratorPort},
    services::{fable_cache::FableCache, fallback_generator::FallbackGenerator},
};

/// Warning attached when the remote generator was skipped because results could not be cached
pub const REMOTE_SKIPPED_WARNING: &str = "Remote generation skipped due to cache unavailability";

/// Warning attached when the cache was unavailable and no remote call was due anyway
pub const UNCACHED_WARNING: &str = "Fable cache unavailable; result was not cached";

/// Orchestrates cache, remote generator and fallback
pub struct FableService {
    cache: FableCache,
    remote: Option<Arc<dyn RemoteGeneratorPort>>,
    fallback: FallbackGenerator,
}

impl fmt::Debug for FableService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FableService")
            .field("cache", &self.cache)
            .field("remote_configured", &self.remote.is_some())
            .finish_non_exhaustive()
    }
}

impl FableService {
    /// Create a service without a remote generator
    pub fn new(cache: Arc<dyn FableCachePort>) -> Self {
        Self {
            cache: FableCache::new(cache),
            remote: None,
            fallback: FallbackGenerator::new(),
        }
    }

    /// Attach a remote generator
    #[must_use]
    pub fn with_remote(mut self, remote: Arc<dyn RemoteGeneratorPort>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Whether a remote generator with credentials is attached
    pub fn remote_configured(&self) -> bool {
        self.remote.as_ref().is_some_and(|r| r.has_credentials())
    }

    /// Whether the cache store currently answers
    pub async fn cache_available(&self) -> bool {
        self.cache.is_available().await
    }

    /// Produce a fable for a validated request
    ///
    /// Never fails. A panic inside the pipeline is answered with the fallback
    /// fable for the same request, without touching the cache.
    #[instrument(
        skip(self, request),
        fields(character1 = %request.character1(), character2 = %request.character2(), style = %request.style())
    )]
    pub async fn generate(&self, request: &FableRequest) -> GeneratedFable {
        match AssertUnwindSafe(self.run_pipeline(request))
            .catch_unwind()
            .await
        {
            Ok(fable) => {
                info!(source = %fable.source, cached = fable.cached, "Fable served");
                fable
            },
            Err(_) => {
                error!("Fable pipeline panicked, serving fallback");
                GeneratedFable::fallback(self.fallback.generate(request))
            },
        }
    }

    async fn run_pipeline(&self, request: &FableRequest) -> GeneratedFable {
        let key = request.cache_key();

        let cache_available = self.cache.is_available().await;
        if cache_available {
            if let Some(fable) = self.cache.lookup(&key).await.into_hit() {
                return GeneratedFable::from_cache(fable);
            }
        } else {
            warn!(cache_key = %key, "Fable cache unavailable, skipping cache");
        }

        let remote = self.remote.as_ref().filter(|r| r.has_credentials());
        let fable = match remote {
            Some(remote) if cache_available => match remote.generate(request).await {
                Ok(text) => GeneratedFable::remote(text),
                Err(e) => {
                    warn!(error = %e, model = %remote.model(), "Remote generation failed, using fallback");
                    GeneratedFable::fallback(self.fallback.generate(request))
                },
            },
            _ => GeneratedFable::fallback(self.fallback.generate(request)),
        };

        if cache_available {
            self.cache.store(&key, &fable.fable, request).await;
            fable
        } else if remote.is_some() {
            fable.with_warning(REMOTE_SKIPPED_WARNING)
        } else {
            fable.with_warning(UNCACHED_WARNING)
        }
    }
}
