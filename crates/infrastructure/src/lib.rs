//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the cache store adapters, the remote generator adapter,
//! configuration loading and logging setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::RemoteFableAdapter;
pub use cache::{PostgrestFableCache, UnavailableFableCache, build_fable_cache};
pub use self::config::{AppConfig, CacheBackend, CacheConfig, LogFormat, ServerConfig};
pub use persistence::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError, SqliteFableCache};
pub use telemetry::init_tracing;
