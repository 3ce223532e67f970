//! Fable request entity

use crate::{
    errors::DomainError,
    value_objects::{CacheKey, StyleMode},
};

/// The five parameters a fable is generated from
///
/// Values are kept exactly as supplied; normalization only happens when a
/// cache key is derived or a template is filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FableRequest {
    character1: String,
    character2: String,
    setting: String,
    moral: String,
    style_mode: String,
}

impl FableRequest {
    /// Create a request, rejecting blank fields
    ///
    /// Every blank field is reported at once. Whether the two characters
    /// differ is left to the caller.
    pub fn new(
        character1: impl Into<String>,
        character2: impl Into<String>,
        setting: impl Into<String>,
        moral: impl Into<String>,
        style_mode: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let request = Self {
            character1: character1.into(),
            character2: character2.into(),
            setting: setting.into(),
            moral: moral.into(),
            style_mode: style_mode.into(),
        };

        let missing: Vec<&'static str> = request
            .named_fields()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();

        if missing.is_empty() {
            Ok(request)
        } else {
            Err(DomainError::MissingFields(missing))
        }
    }

    /// Build a request from optional fields, treating absent ones as blank
    pub fn from_optional(
        character1: Option<String>,
        character2: Option<String>,
        setting: Option<String>,
        moral: Option<String>,
        style_mode: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::new(
            character1.unwrap_or_default(),
            character2.unwrap_or_default(),
            setting.unwrap_or_default(),
            moral.unwrap_or_default(),
            style_mode.unwrap_or_default(),
        )
    }

    fn named_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("character1", &self.character1),
            ("character2", &self.character2),
            ("setting", &self.setting),
            ("moral", &self.moral),
            ("styleMode", &self.style_mode),
        ]
    }

    pub fn character1(&self) -> &str {
        &self.character1
    }

    pub fn character2(&self) -> &str {
        &self.character2
    }

    pub fn setting(&self) -> &str {
        &self.setting
    }

    pub fn moral(&self) -> &str {
        &self.moral
    }

    /// The raw style flag as supplied
    pub fn style_mode(&self) -> &str {
        &self.style_mode
    }

    /// The narrative style selected by the style flag
    pub fn style(&self) -> StyleMode {
        StyleMode::detect(&self.style_mode)
    }

    /// Derive the cache key for this request
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::derive(self)
    }
}
