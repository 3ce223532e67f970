//! Generated fable entity

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the text of a fable came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FableSource {
    /// Served from the fable cache
    Cache,
    /// Produced by the remote text-generation service
    Remote,
    /// Produced by the deterministic offline generator
    Fallback,
}

impl fmt::Display for FableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Remote => write!(f, "remote"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Result of the generation pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFable {
    /// The fable text
    pub fable: String,
    /// Whether the text was served from the cache
    pub cached: bool,
    /// Non-fatal note about degraded operation
    pub warning: Option<String>,
    /// Which tier produced the text
    pub source: FableSource,
}

impl GeneratedFable {
    /// A fable served from the cache
    pub fn from_cache(fable: impl Into<String>) -> Self {
        Self::new(fable, FableSource::Cache)
    }

    /// A fable produced by the remote generator
    pub fn remote(fable: impl Into<String>) -> Self {
        Self::new(fable, FableSource::Remote)
    }

    /// A fable produced by the fallback generator
    pub fn fallback(fable: impl Into<String>) -> Self {
        Self::new(fable, FableSource::Fallback)
    }

    fn new(fable: impl Into<String>, source: FableSource) -> Self {
        Self {
            fable: fable.into(),
            cached: source == FableSource::Cache,
            warning: None,
            source,
        }
    }

    /// Attach a warning
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}
