//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `cache`: Fable cache store selection and credentials
//!
//! Remote generation settings live in [`ai_core::GenerationConfig`].

mod cache;
mod server;

use ai_core::GenerationConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use cache::{CacheBackend, CacheConfig};
pub use server::{LogFormat, ServerConfig};

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Prefix of structured environment overrides (e.g. `FABULIST__SERVER__PORT`)
pub const ENV_PREFIX: &str = "FABULIST";

/// Conventional variable holding the remote generator credential
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Conventional variables holding the cache project URL, in lookup order
pub const CACHE_URL_VARS: [&str; 2] = ["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];

/// Conventional variable holding the cache service credential
pub const CACHE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote generator settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Fable cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Sources in increasing precedence: built-in defaults, an optional
    /// `config.toml` in the working directory, `FABULIST__*` variables.
    /// Conventional credential variables fill whatever is still empty.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = Self::defaults()?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., FABULIST__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_conventional_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a TOML document, ignoring the environment
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        Self::defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("generation.model", "gpt-4o-mini")?
            .set_default("cache.backend", "postgrest")
    }

    /// Fill empty credentials from conventional variable names
    ///
    /// Values that are already configured are never overridden.
    pub fn apply_conventional_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if !self.generation.has_credentials() {
            if let Some(key) = non_empty(OPENAI_API_KEY_VAR) {
                self.generation.api_key = Some(SecretString::from(key));
                debug!("Loaded generation.api_key from {OPENAI_API_KEY_VAR}");
            }
        }

        if self.cache.url.as_deref().is_none_or(|u| u.trim().is_empty()) {
            if let Some(url) = CACHE_URL_VARS.iter().find_map(|name| non_empty(name)) {
                self.cache.url = Some(url);
                debug!("Loaded cache.url from environment");
            }
        }

        let key_missing = self
            .cache
            .service_key
            .as_ref()
            .is_none_or(|k| k.expose_secret().trim().is_empty());
        if key_missing {
            if let Some(key) = non_empty(CACHE_KEY_VAR) {
                self.cache.service_key = Some(SecretString::from(key));
                debug!("Loaded cache.service_key from {CACHE_KEY_VAR}");
            }
        }
    }
}
