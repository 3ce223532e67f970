//! Application services
//!
//! Services orchestrate domain objects and ports to implement use cases.

mod cache_maintenance_service;
mod fable_cache;
mod fable_service;
mod fallback_generator;

pub use cache_maintenance_service::{CacheMaintenanceService, DEFAULT_MAX_AGE_DAYS, EvictionReport};
pub use fable_cache::{CacheLookup, CacheWrite, FableCache};
pub use fable_service::{FableService, REMOTE_SKIPPED_WARNING, UNCACHED_WARNING};
pub use fallback_generator::FallbackGenerator;
