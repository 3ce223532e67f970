//! Fable cache store configuration.

use std::{fmt, time::Duration};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Which store backs the fable cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Hosted table behind a PostgREST (Supabase) endpoint
    #[default]
    Postgrest,
    /// Embedded SQLite database
    Sqlite,
    /// No cache; every request degrades to uncached operation
    Disabled,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgrest => write!(f, "postgrest"),
            Self::Sqlite => write!(f, "sqlite"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Fable cache configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Backend selection
    #[serde(default)]
    pub backend: CacheBackend,

    /// Project URL of the PostgREST service
    #[serde(default)]
    pub url: Option<String>,

    /// Path of the REST API below the project URL
    #[serde(default = "default_rest_path")]
    pub rest_path: String,

    /// Service credential (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub service_key: Option<SecretString>,

    /// Table name
    #[serde(default = "default_table")]
    pub table: String,

    /// Per-call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// SQLite database URL
    #[serde(default = "default_sqlite_url")]
    pub sqlite_url: String,

    /// Retention applied when no explicit age is given
    #[serde(default = "default_max_age_days")]
    pub default_max_age_days: u32,

    /// Interval of the background eviction sweep (disabled when unset)
    #[serde(default)]
    pub cleanup_interval_hours: Option<u64>,
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("backend", &self.backend)
            .field("url", &self.url)
            .field("rest_path", &self.rest_path)
            .field(
                "service_key",
                &if self.service_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("table", &self.table)
            .field("timeout_ms", &self.timeout_ms)
            .field("sqlite_url", &self.sqlite_url)
            .field("default_max_age_days", &self.default_max_age_days)
            .field("cleanup_interval_hours", &self.cleanup_interval_hours)
            .finish()
    }
}

fn default_rest_path() -> String {
    "/rest/v1".to_string()
}

fn default_table() -> String {
    "fable_cache".to_string()
}

const fn default_timeout_ms() -> u64 {
    3000
}

fn default_sqlite_url() -> String {
    "sqlite:fabulist.db".to_string()
}

const fn default_max_age_days() -> u32 {
    30
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            url: None,
            rest_path: default_rest_path(),
            service_key: None,
            table: default_table(),
            timeout_ms: default_timeout_ms(),
            sqlite_url: default_sqlite_url(),
            default_max_age_days: default_max_age_days(),
            cleanup_interval_hours: None,
        }
    }
}

impl CacheConfig {
    /// Per-call timeout as a Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Eviction sweep interval, if scheduled
    pub fn cleanup_interval(&self) -> Option<Duration> {
        self.cleanup_interval_hours
            .filter(|hours| *hours > 0)
            .map(|hours| Duration::from_secs(hours * 60 * 60))
    }
}
