//! Cached fable record

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{entities::FableRequest, value_objects::CacheKey};

/// A persisted fable together with the parameters that produced it
///
/// Field names match the `fable_cache` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub cache_key: CacheKey,
    pub fable_content: String,
    pub character1: String,
    pub character2: String,
    pub setting: String,
    pub moral: String,
    pub style_mode: String,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry for a freshly generated fable
    pub fn new(
        cache_key: CacheKey,
        fable: impl Into<String>,
        request: &FableRequest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            cache_key,
            fable_content: fable.into(),
            character1: request.character1().to_string(),
            character2: request.character2().to_string(),
            setting: request.setting().to_string(),
            moral: request.moral().to_string(),
            style_mode: request.style_mode().to_string(),
            created_at,
        }
    }

    /// Oldest creation time that survives an eviction sweep
    ///
    /// Entries strictly older than the cutoff are evicted; an entry created
    /// exactly at the cutoff is kept. `None` when the window reaches back
    /// before year 1, in which case nothing is old enough to evict.
    pub fn eviction_cutoff(now: DateTime<Utc>, max_age_days: u32) -> Option<DateTime<Utc>> {
        TimeDelta::try_days(i64::from(max_age_days))
            .and_then(|age| now.checked_sub_signed(age))
            .filter(|cutoff| cutoff.year() >= 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(created_at: DateTime<Utc>) -> CacheEntry {
        let request = FableRequest::new("Lion", "Mouse", "Jungle", "Be kind", "yes").unwrap();
        CacheEntry::new(request.cache_key(), "Once upon a time", &request, created_at)
    }

    #[test]
    fn new_copies_request_fields() {
        let now = Utc::now();
        let entry = entry_at(now);
        assert_eq!(entry.character1, "Lion");
        assert_eq!(entry.style_mode, "yes");
        assert_eq!(entry.fable_content, "Once upon a time");
        assert_eq!(entry.created_at, now);
    }

    #[test]
    fn cutoff_subtracts_whole_days() {
        let now = Utc::now();
        assert_eq!(
            CacheEntry::eviction_cutoff(now, 30),
            Some(now - TimeDelta::days(30))
        );
        assert_eq!(CacheEntry::eviction_cutoff(now, 0), Some(now));
    }

    #[test]
    fn huge_window_has_no_cutoff() {
        let now = Utc::now();
        assert_eq!(CacheEntry::eviction_cutoff(now, 100_000_000), None);
        assert_eq!(CacheEntry::eviction_cutoff(now, u32::MAX), None);
    }

    #[test]
    fn cutoff_stops_at_year_one() {
        let now = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(CacheEntry::eviction_cutoff(now, 738_000).is_some());
        assert!(CacheEntry::eviction_cutoff(now, 740_000).is_none());
    }

    #[test]
    fn serializes_with_column_names() {
        let entry = entry_at(Utc::now());
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("cache_key").is_some());
        assert!(json.get("fable_content").is_some());
        assert!(json.get("style_mode").is_some());
        assert!(json["created_at"].is_string());
    }
}
