//! Content-addressed cache key for fable requests
//!
//! The key is a BLAKE3 digest over a canonical form of the request: every
//! field is trimmed and lower-cased, and fields are hashed in sorted
//! field-name order with length prefixes.
//!
//! # Examples
//!
//! ```
//! use domain::CacheKey;
//!
//! let a = CacheKey::derive_from_parts("Lion", "Mouse", "Jungle", "Be kind", "yes");
//! let b = CacheKey::derive_from_parts("  lion ", "MOUSE", "jungle", "be kind", "YES");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str().len(), 64);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::FableRequest;

/// Stable identifier for a unique combination of generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a validated request
    pub fn derive(request: &FableRequest) -> Self {
        Self::derive_from_parts(
            request.character1(),
            request.character2(),
            request.setting(),
            request.moral(),
            request.style_mode(),
        )
    }

    /// Derive a key from raw fields
    ///
    /// Empty fields are allowed and hash deterministically.
    pub fn derive_from_parts(
        character1: &str,
        character2: &str,
        setting: &str,
        moral: &str,
        style_mode: &str,
    ) -> Self {
        let mut fields = [
            ("character1", character1),
            ("character2", character2),
            ("setting", setting),
            ("moral", moral),
            ("style_mode", style_mode),
        ];
        fields.sort_unstable_by_key(|(name, _)| *name);

        let mut hasher = blake3::Hasher::new();
        for (name, value) in fields {
            let normalized = normalize(value);
            update_prefixed(&mut hasher, name.as_bytes());
            update_prefixed(&mut hasher, normalized.as_bytes());
        }

        Self(hasher.finalize().to_hex().to_string())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Canonical form of a single field
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn update_prefixed(hasher: &mut blake3::Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c1: &str, c2: &str, setting: &str, moral: &str, style: &str) -> CacheKey {
        CacheKey::derive_from_parts(c1, c2, setting, moral, style)
    }

    #[test]
    fn derive_is_deterministic() {
        let a = key("Lion", "Mouse", "Jungle", "Be kind", "yes");
        let b = key("Lion", "Mouse", "Jungle", "Be kind", "yes");
        assert_eq!(a, b);
    }

    #[test]
    fn case_and_surrounding_whitespace_collapse() {
        let a = key("Lion", "Mouse", "Jungle", "Be kind", "yes");
        let b = key("  LION", "mouse\t", " jungle ", "BE KIND", " Yes ");
        assert_eq!(a, b);
    }

    #[test]
    fn inner_whitespace_is_significant() {
        let a = key("Lion", "Mouse", "Jungle", "Be kind", "yes");
        let b = key("Lion", "Mouse", "Jungle", "Be  kind", "yes");
        assert_ne!(a, b);
    }

    #[test]
    fn swapping_characters_changes_key() {
        let a = key("Lion", "Mouse", "Jungle", "Be kind", "yes");
        let b = key("Mouse", "Lion", "Jungle", "Be kind", "yes");
        assert_ne!(a, b);
    }

    #[test]
    fn shifting_text_between_fields_changes_key() {
        let a = key("ab", "c", "x", "y", "z");
        let b = key("a", "bc", "x", "y", "z");
        assert_ne!(a, b);
    }

    #[test]
    fn empty_fields_hash_deterministically() {
        let a = key("", "", "", "", "");
        let b = key("", "", "", "", "");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn derive_matches_request_fields() {
        let request = FableRequest::new("Fox", "Crow", "Forest", "Beware flattery", "no").unwrap();
        assert_eq!(
            CacheKey::derive(&request),
            key("fox", "crow", "forest", "beware flattery", "no")
        );
    }

    #[test]
    fn key_is_lowercase_hex() {
        let k = key("Lion", "Mouse", "Jungle", "Be kind", "yes");
        assert!(k.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn serializes_as_plain_string() {
        let k = key("a", "b", "c", "d", "e");
        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, format!("\"{k}\""));
    }
}
