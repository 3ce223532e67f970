//! Health check handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
///
/// `ready` stays true while degraded: a fable can always be produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub cache: ServiceStatus,
    pub remote: RemoteStatus,
}

/// Status of the cache store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub healthy: bool,
}

/// Status of the remote generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Readiness check - which tiers are currently usable?
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let cache_healthy = state.fable_service.cache_available().await;
    let configured = state.fable_service.remote_configured();

    Json(ReadinessResponse {
        ready: true,
        cache: ServiceStatus {
            healthy: cache_healthy,
        },
        remote: RemoteStatus {
            configured,
            model: configured.then(|| state.config.generation.model.clone()),
        },
    })
}
