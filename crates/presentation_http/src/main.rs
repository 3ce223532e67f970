//! Fabulist HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{CacheMaintenanceService, FableService};
use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, RemoteFableAdapter, build_fable_cache, init_tracing};
use presentation_http::{RequestIdLayer, routes, state::AppState, tasks::spawn_cache_cleanup_task};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

const DEFAULT_LOG_FILTER: &str = "fabulist_server=debug,presentation_http=debug,application=info,infrastructure=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_tracing(config.server.log_format, DEFAULT_LOG_FILTER)?;

    info!("Fabulist v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = loaded {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        cache_backend = ?config.cache.backend,
        model = %config.generation.model,
        remote_credentials = config.generation.has_credentials(),
        "Configuration loaded"
    );

    // Cache store degrades to an always-unavailable cache when misconfigured
    let cache = build_fable_cache(&config.cache).await;

    let mut fable_service = FableService::new(Arc::clone(&cache));
    match RemoteFableAdapter::new(config.generation.clone()) {
        Ok(adapter) => fable_service = fable_service.with_remote(Arc::new(adapter)),
        Err(e) => warn!(error = %e, "Remote generator unavailable, serving fallback fables only"),
    }

    let maintenance_service = Arc::new(
        CacheMaintenanceService::new(Arc::clone(&cache))
            .with_default_max_age(config.cache.default_max_age_days),
    );

    let cleanup_handle = config
        .cache
        .cleanup_interval()
        .map(|interval| spawn_cache_cleanup_task(Arc::clone(&maintenance_service), interval));

    let server_config = config.server.clone();
    let state = AppState {
        fable_service: Arc::new(fable_service),
        maintenance_service,
        config: Arc::new(config),
    };

    let app = routes::create_router(state)
        .layer(RequestBodyLimitLayer::new(server_config.max_body_size_json_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new());

    let app = if server_config.cors_enabled {
        app.layer(cors_layer(&server_config.allowed_origins))
    } else {
        app
    };

    let addr = server_config.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(server_config.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    info!("Server shutdown complete");

    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any)
    }
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
