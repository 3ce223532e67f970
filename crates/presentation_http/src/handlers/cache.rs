//! Cache maintenance handlers

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Cache statistics response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub total_entries: u64,
    pub oldest_entry: Option<DateTime<Utc>>,
}

/// Query of `DELETE /cache`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanCacheParams {
    /// Retention window in days, kept raw so that bad input maps to 400
    pub max_age: Option<String>,
}

impl CleanCacheParams {
    /// Parsed retention window, `None` when absent
    pub fn max_age_days(&self) -> Result<Option<u32>, ApiError> {
        self.max_age
            .as_deref()
            .map(|raw| {
                raw.trim().parse::<u32>().map_err(|_| {
                    ApiError::BadRequest(format!(
                        "maxAge must be a non-negative whole number of days, got '{raw}'"
                    ))
                })
            })
            .transpose()
    }
}

/// Eviction response
#[derive(Debug, Serialize, Deserialize)]
pub struct CleanCacheResponse {
    pub message: String,
    pub deleted: u64,
}

/// Report the number of cached fables and the oldest creation time
///
/// Always answers; an unreachable store reports an empty cache.
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.maintenance_service.stats().await;
    Json(CacheStatsResponse {
        total_entries: stats.total_entries,
        oldest_entry: stats.oldest_entry,
    })
}

/// Delete cached fables older than `maxAge` days
#[instrument(skip(state, params))]
pub async fn clean_cache(
    State(state): State<AppState>,
    params: Result<Query<CleanCacheParams>, QueryRejection>,
) -> Result<Json<CleanCacheResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let max_age_days = params.max_age_days()?;

    let report = state.maintenance_service.evict(max_age_days).await?;

    Ok(Json(CleanCacheResponse {
        message: report.message(),
        deleted: report.deleted,
    }))
}
