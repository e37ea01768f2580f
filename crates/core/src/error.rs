// Error types for webhook ingestion and event queries
//
// Errors are layered into three classes so the HTTP boundary can map them to
// status codes deterministically: validation (client), storage, unexpected.

use thiserror::Error;

/// Result type alias for ingestion and query operations
pub type Result<T> = std::result::Result<T, HookError>;

/// Coarse error class used to pick the response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller sent something we cannot use (HTTP 400)
    Validation,
    /// The document store is unreachable or rejected the operation (HTTP 500)
    Storage,
    /// Anything else (HTTP 500)
    Unexpected,
}

/// Errors that can occur while ingesting or querying events
#[derive(Debug, Error)]
pub enum HookError {
    /// No storage handle could be established, even after a reconnect attempt
    #[error("Database not available")]
    StorageUnavailable,

    /// Body is empty, not JSON, or not a non-empty JSON object
    #[error("Invalid JSON payload")]
    InvalidJson,

    /// A payload field is present but has the wrong shape
    #[error("Missing expected data in payload: {field} (expected {expected})")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    /// Driver-level failure during insert or query
    #[error("Database error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal server error: {0}")]
    Unexpected(String),
}

impl HookError {
    /// Create a field-shape validation error
    pub fn invalid_field(field: impl Into<String>, expected: &'static str) -> Self {
        HookError::InvalidField {
            field: field.into(),
            expected,
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        HookError::Storage(msg.into())
    }

    /// Create an unexpected error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        HookError::Unexpected(msg.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            HookError::InvalidJson | HookError::InvalidField { .. } => ErrorClass::Validation,
            HookError::StorageUnavailable | HookError::Storage(_) => ErrorClass::Storage,
            HookError::Unexpected(_) => ErrorClass::Unexpected,
        }
    }
}

impl From<serde_json::Error> for HookError {
    fn from(err: serde_json::Error) -> Self {
        HookError::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(HookError::InvalidJson.class(), ErrorClass::Validation);
        assert_eq!(
            HookError::invalid_field("pusher.name", "string").class(),
            ErrorClass::Validation
        );
        assert_eq!(HookError::StorageUnavailable.class(), ErrorClass::Storage);
        assert_eq!(HookError::storage("boom").class(), ErrorClass::Storage);
        assert_eq!(HookError::unexpected("boom").class(), ErrorClass::Unexpected);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            HookError::StorageUnavailable.to_string(),
            "Database not available"
        );
        assert_eq!(HookError::InvalidJson.to_string(), "Invalid JSON payload");
        assert_eq!(
            HookError::invalid_field("pull_request.head.ref", "string").to_string(),
            "Missing expected data in payload: pull_request.head.ref (expected string)"
        );
        assert_eq!(
            HookError::storage("connection reset").to_string(),
            "Database error: connection reset"
        );
    }
}
