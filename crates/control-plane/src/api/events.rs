// Recent events HTTP route
// Returns a bare JSON array, newest first

use axum::{extract::State, routing::get, Json, Router};
use hookfeed_core::StoredEvent;
use std::sync::Arc;

use super::common::{ApiError, StatusResponse};
use crate::services::EventService;

/// App state for events routes
#[derive(Clone)]
pub struct AppState {
    pub event_service: Arc<EventService>,
}

impl AppState {
    pub fn new(event_service: Arc<EventService>) -> Self {
        Self { event_service }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/events", get(list_recent_events))
        .with_state(state)
}

/// GET /api/events - The 20 most recent events
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Most recent events, newest first", body = [StoredEvent]),
        (status = 500, description = "Storage unavailable or failed", body = StatusResponse)
    ),
    tag = "events"
)]
pub async fn list_recent_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredEvent>>, ApiError> {
    let events = state.event_service.recent().await?;
    Ok(Json(events))
}
