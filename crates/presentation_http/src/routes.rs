//! Route definitions

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Fable generation
        .route("/generate", post(handlers::fable::generate_fable))
        // Cache maintenance
        .route("/cache/stats", get(handlers::cache::cache_stats))
        .route("/cache", delete(handlers::cache::clean_cache))
        .with_state(state)
}
