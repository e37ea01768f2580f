// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the hookfeed API.
// It is used by both the API server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use hookfeed_core::{EventAction, NormalizedEvent, StoredEvent};
use utoipa::OpenApi;

/// OpenAPI documentation for the hookfeed API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::webhook::receive_webhook,
        api::events::list_recent_events,
        api::health::health,
    ),
    components(
        schemas(
            EventAction,
            NormalizedEvent,
            StoredEvent,
            api::StatusResponse,
            api::health::HealthResponse,
        )
    ),
    tags(
        (name = "webhooks", description = "Webhook ingestion"),
        (name = "events", description = "Normalized event queries"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Hookfeed API",
        version = "0.1.0",
        description = "Receives GitHub webhooks, stores normalized repository events and serves the most recent ones",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/webhook".to_string()));
        assert!(paths.contains(&"/api/events".to_string()));
        assert!(paths.contains(&"/health".to_string()));
    }

    #[test]
    fn test_openapi_serializes() {
        let json = ApiDoc::to_json().unwrap();
        assert!(json.contains("StoredEvent"));
    }
}
