//! Scheduled cache eviction
//!
//! Periodically removes cached fables older than the configured retention.

use std::{sync::Arc, time::Duration};

use application::CacheMaintenanceService;
use tracing::{debug, error, info};

/// Spawn a background task that evicts stale fables every `interval`
///
/// The first sweep runs one full interval after startup. Failures are logged
/// and the next tick tries again. Abort the returned handle on shutdown.
pub fn spawn_cache_cleanup_task(
    maintenance: Arc<CacheMaintenanceService>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        max_age_days = maintenance.default_max_age_days(),
        interval_secs = interval.as_secs(),
        "Starting cache cleanup task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;
            debug!("Running scheduled cache cleanup");

            match maintenance.evict(None).await {
                Ok(report) if report.deleted > 0 => {
                    info!(
                        deleted = report.deleted,
                        max_age_days = report.max_age_days,
                        "Evicted stale cached fables"
                    );
                },
                Ok(_) => debug!("No cached fables to evict"),
                Err(e) => error!(error = %e, "Scheduled cache cleanup failed"),
            }
        }
    })
}
