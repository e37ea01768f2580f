// Common DTOs and error mapping for the public API
//
// Webhook acknowledgements and every error share one body shape:
// {"status": "success" | "ignored" | "error", "message": "..."}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hookfeed_core::{ErrorClass, HookError};
use serde::{Deserialize, Serialize};
use std::any::Any;
use utoipa::ToSchema;

/// Status body returned by the webhook endpoint and by all errors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StatusResponse {
    /// One of "success", "ignored", "error".
    #[schema(example = "success")]
    pub status: String,
    /// Human-readable outcome.
    #[schema(example = "Event received and stored")]
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new("success", message)
    }

    pub fn ignored(message: impl Into<String>) -> Self {
        Self::new("ignored", message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }

    fn new(status: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// HTTP-facing wrapper around `HookError`
#[derive(Debug)]
pub struct ApiError(pub HookError);

impl From<HookError> for ApiError {
    fn from(err: HookError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0.class() {
            ErrorClass::Validation => StatusCode::BAD_REQUEST,
            ErrorClass::Storage | ErrorClass::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        StatusResponse::error(self.0.to_string())
            .into_response(status)
            .into_response()
    }
}

/// Response for a handler panic caught by `CatchPanicLayer`
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Request handler panicked");
    ApiError(HookError::unexpected(detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_errors_are_bad_request() {
        let response = ApiError(HookError::InvalidJson).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Invalid JSON payload");
    }

    #[tokio::test]
    async fn test_storage_errors_are_server_errors() {
        let response = ApiError(HookError::StorageUnavailable).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Database not available");

        let response = ApiError(HookError::storage("connection reset")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["message"],
            "Database error: connection reset"
        );
    }

    #[tokio::test]
    async fn test_panic_response() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Internal server error: boom");
    }
}
