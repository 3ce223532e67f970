//! Writing style selection

use std::fmt;

use serde::{Deserialize, Serialize};

/// Markers that request intentionally imperfect ("modelled") writing
const MODELLED_MARKERS: [&str; 2] = ["misspell", "grammatical errors"];

/// Narrative style derived from the free-text style flag of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// Conventional, grammatically correct prose
    #[default]
    Default,
    /// Deliberately imperfect prose for modelled-writing exercises
    Modelled,
}

impl StyleMode {
    /// Detect the style from a raw style flag
    ///
    /// Matching is ASCII case-insensitive so that it agrees with cache key
    /// normalization: two flags that share a key always share a style.
    ///
    /// ```
    /// use domain::StyleMode;
    ///
    /// assert_eq!(StyleMode::detect("include misspellings"), StyleMode::Modelled);
    /// assert_eq!(StyleMode::detect("yes"), StyleMode::Default);
    /// ```
    pub fn detect(raw: &str) -> Self {
        let lowered = raw.to_ascii_lowercase();
        if MODELLED_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            Self::Modelled
        } else {
            Self::Default
        }
    }

    /// Whether this is the modelled (imperfect writing) style
    pub const fn is_modelled(self) -> bool {
        matches!(self, Self::Modelled)
    }
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Modelled => write!(f, "modelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misspell_marker_selects_modelled() {
        assert_eq!(StyleMode::detect("misspell"), StyleMode::Modelled);
        assert_eq!(
            StyleMode::detect("with some misspellings please"),
            StyleMode::Modelled
        );
    }

    #[test]
    fn grammar_marker_selects_modelled() {
        assert_eq!(
            StyleMode::detect("add grammatical errors"),
            StyleMode::Modelled
        );
    }

    #[test]
    fn detection_ignores_ascii_case() {
        assert_eq!(StyleMode::detect("MISSPELL"), StyleMode::Modelled);
        assert_eq!(StyleMode::detect("Grammatical Errors"), StyleMode::Modelled);
    }

    #[test]
    fn anything_else_is_default() {
        assert_eq!(StyleMode::detect("yes"), StyleMode::Default);
        assert_eq!(StyleMode::detect(""), StyleMode::Default);
        assert_eq!(StyleMode::detect("grammatical"), StyleMode::Default);
    }

    #[test]
    fn display_and_serialization() {
        assert_eq!(StyleMode::Modelled.to_string(), "modelled");
        assert_eq!(
            serde_json::to_string(&StyleMode::Default).unwrap(),
            "\"default\""
        );
    }

    #[test]
    fn is_modelled() {
        assert!(StyleMode::Modelled.is_modelled());
        assert!(!StyleMode::Default.is_modelled());
    }
}
