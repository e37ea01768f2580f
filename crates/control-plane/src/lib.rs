// Hookfeed Control Plane Library
// Decision: Shared library for binaries (API server, OpenAPI export) and router tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Environment configuration
pub mod config;

// Services layer
pub mod services;
pub use services::EventService;

// Storage layer
pub mod storage;

// Logging setup
pub mod telemetry;

// OpenAPI spec generation
pub mod openapi;


use axum::Router;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::storage::StorageClient;

/// Build the application router over a shared storage client.
/// CORS and request tracing are layered on by the binary.
pub fn app(storage: Arc<StorageClient>) -> Router {
    let event_service = Arc::new(EventService::new(storage.clone()));

    let swagger =
        SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", openapi::ApiDoc::openapi());

    Router::new()
        .merge(api::index::routes())
        .merge(api::webhook::routes(api::webhook::AppState::new(
            event_service.clone(),
        )))
        .merge(api::events::routes(api::events::AppState::new(event_service)))
        .merge(api::health::routes(api::health::HealthState { storage }))
        .merge(swagger)
        .layer(CatchPanicLayer::custom(api::panic_response))
}
