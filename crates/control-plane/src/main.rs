// Hookfeed API server
// Decision: Storage outages never prevent startup; requests reconnect lazily
// Decision: Dev mode (STORAGE_BACKEND=memory) runs without a database

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use hookfeed_control_plane::config::AppConfig;
use hookfeed_control_plane::storage::{StorageClient, StorageSettings};
use hookfeed_control_plane::telemetry::{init_telemetry, TelemetryConfig};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env file; real environment wins
    dotenvy::dotenv().ok();

    // Configure via environment variables:
    // - RUST_LOG / LOG_LEVEL: Log filter (default: "hookfeed_control_plane=debug,tower_http=debug")
    // - LOG_FORMAT: "json" for JSON lines
    init_telemetry(TelemetryConfig::from_env());

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "hookfeed starting...");

    let config = AppConfig::from_env();

    // Connect to the document store. Failure is logged and the server starts anyway.
    let storage = Arc::new(StorageClient::new(StorageSettings::from_config(&config)));
    if !storage.open().await {
        tracing::warn!(
            target_store = %storage.describe(),
            "Starting without document store; requests will retry the connection"
        );
    }

    let cors_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
    }

    let app = hookfeed_control_plane::app(storage.clone());

    // Add CORS layer only if origins are configured
    let app = if !cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    header::ORIGIN,
                    header::CACHE_CONTROL,
                ]),
        )
    } else {
        app
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", config.bind_addr))?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    storage.close().await;
    tracing::info!("hookfeed stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
