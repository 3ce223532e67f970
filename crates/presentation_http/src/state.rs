//! Application state shared across handlers

use std::sync::Arc;

use application::{CacheMaintenanceService, FableService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Generate-or-serve-from-cache pipeline
    pub fable_service: Arc<FableService>,
    /// Cache statistics and eviction
    pub maintenance_service: Arc<CacheMaintenanceService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
