//! Cache backend selection from configuration

use std::sync::Arc;

use application::ports::FableCachePort;
use tracing::{info, warn};

use super::{PostgrestFableCache, UnavailableFableCache};
use crate::{
    config::{CacheBackend, CacheConfig},
    persistence::{AsyncDatabase, AsyncDatabaseConfig, SqliteFableCache},
};

/// Build the configured cache backend
///
/// Misconfiguration never fails startup: the affected backend is replaced by
/// an [`UnavailableFableCache`] and requests degrade to uncached operation.
pub async fn build_fable_cache(config: &CacheConfig) -> Arc<dyn FableCachePort> {
    match config.backend {
        CacheBackend::Disabled => {
            info!("Fable cache disabled by configuration");
            Arc::new(UnavailableFableCache::new("cache disabled by configuration"))
        },
        CacheBackend::Postgrest => match PostgrestFableCache::new(config) {
            Ok(cache) => {
                info!(table = %config.table, "Using PostgREST fable cache");
                Arc::new(cache)
            },
            Err(e) => {
                warn!(error = %e, "PostgREST fable cache not configured");
                Arc::new(UnavailableFableCache::new(e.to_string()))
            },
        },
        CacheBackend::Sqlite => {
            let db_config = AsyncDatabaseConfig::from_url(&config.sqlite_url);
            let db = match AsyncDatabase::new(&db_config).await {
                Ok(db) => db,
                Err(e) => {
                    warn!(error = %e, url = %config.sqlite_url, "Failed to open SQLite fable cache");
                    return Arc::new(UnavailableFableCache::new(e.to_string()));
                },
            };
            if let Err(e) = db.migrate().await {
                warn!(error = %e, "Failed to migrate SQLite fable cache");
                return Arc::new(UnavailableFableCache::new(e.to_string()));
            }
            info!(url = %config.sqlite_url, "Using SQLite fable cache");
            Arc::new(SqliteFableCache::new(db.pool().clone()))
        },
    }
}
