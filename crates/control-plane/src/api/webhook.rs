// Webhook ingestion HTTP route
//
// The body is taken as raw bytes so that empty and non-JSON bodies reach the
// service and get the same error shape as every other failure.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use hookfeed_core::EVENT_HEADER;
use std::sync::Arc;

use super::common::{ApiError, StatusResponse};
use crate::services::{EventService, IngestOutcome};

/// Largest delivery GitHub sends (25 MB), replacing axum's 2 MB default
pub const MAX_WEBHOOK_BODY_BYTES: usize = 25 * 1024 * 1024;

// ============================================
// App State and Routes
// ============================================

/// App state for webhook routes
#[derive(Clone)]
pub struct AppState {
    pub event_service: Arc<EventService>,
}

impl AppState {
    pub fn new(event_service: Arc<EventService>) -> Self {
        Self { event_service }
    }
}

/// Create webhook routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .layer(DefaultBodyLimit::max(MAX_WEBHOOK_BODY_BYTES))
        .with_state(state)
}

// ============================================
// HTTP Handlers
// ============================================

/// POST /webhook - Receive a GitHub webhook delivery
#[utoipa::path(
    post,
    path = "/webhook",
    params(
        ("X-GitHub-Event" = Option<String>, Header, description = "Event kind, e.g. push or pull_request")
    ),
    request_body(
        content = String,
        content_type = "application/json",
        description = "Raw webhook payload (non-empty JSON object)"
    ),
    responses(
        (status = 200, description = "Event stored, or event kind ignored", body = StatusResponse),
        (status = 400, description = "Empty, non-JSON, or malformed payload", body = StatusResponse),
        (status = 500, description = "Storage unavailable or failed", body = StatusResponse)
    ),
    tag = "webhooks"
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError> {
    let kind = headers.get(EVENT_HEADER).and_then(|v| v.to_str().ok());

    let response = match state.event_service.ingest(kind, &body).await? {
        IngestOutcome::Stored(_) => StatusResponse::success("Event received and stored"),
        IngestOutcome::Ignored { kind } => {
            StatusResponse::ignored(format!("Unhandled event type: {kind}"))
        }
    };

    Ok(Json(response))
}
