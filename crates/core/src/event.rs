// Normalized event domain types
//
// A NormalizedEvent is the reduced, platform-agnostic record derived from a
// raw webhook payload. It is the only entity persisted by the service and is
// never mutated after insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::timestamp::iso_utc;

/// Placeholder stored when an expected payload field is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Kind of repository activity captured by a normalized event.
/// - `push`: commits pushed to a ref
/// - `pull_request`: pull request opened, reopened, synchronized, or closed without merge
/// - `merge`: pull request closed with the merge flag set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Push,
    PullRequest,
    Merge,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Push => "push",
            EventAction::PullRequest => "pull_request",
            EventAction::Merge => "merge",
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized webhook event as persisted in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NormalizedEvent {
    /// Actor who triggered the event ("N/A" if absent from the payload).
    #[cfg_attr(feature = "openapi", schema(example = "octocat"))]
    pub author: String,
    /// Derived event action.
    pub action: EventAction,
    /// Source branch. Always null for pushes.
    #[cfg_attr(feature = "openapi", schema(example = "feature/login"))]
    pub from_branch: Option<String>,
    /// Target branch.
    #[cfg_attr(feature = "openapi", schema(example = "main"))]
    pub to_branch: String,
    /// Server time at ingestion, ISO-8601 UTC with trailing "Z".
    #[serde(with = "iso_utc")]
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2024-05-01T12:30:00.000000Z")
    )]
    pub timestamp: DateTime<Utc>,
}

impl NormalizedEvent {
    pub fn push(author: impl Into<String>, to_branch: impl Into<String>, ts: DateTime<Utc>) -> Self {
        Self {
            author: author.into(),
            action: EventAction::Push,
            from_branch: None,
            to_branch: to_branch.into(),
            timestamp: ts,
        }
    }

    /// Build a pull request event. A merged pull request becomes a `merge` event.
    pub fn pull_request(
        author: impl Into<String>,
        from_branch: impl Into<String>,
        to_branch: impl Into<String>,
        merged: bool,
        ts: DateTime<Utc>,
    ) -> Self {
        Self {
            author: author.into(),
            action: if merged {
                EventAction::Merge
            } else {
                EventAction::PullRequest
            },
            from_branch: Some(from_branch.into()),
            to_branch: to_branch.into(),
            timestamp: ts,
        }
    }
}

/// Normalized event as returned by the query endpoint, with its
/// storage-assigned identifier rendered as a plain string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StoredEvent {
    /// Storage-assigned identifier.
    #[serde(rename = "_id")]
    #[cfg_attr(
        feature = "openapi",
        schema(example = "01907f0e-8b4a-7cc2-9a51-2f0d4b7a8e21")
    )]
    pub id: String,
    #[serde(flatten)]
    pub event: NormalizedEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_push_event_serialization() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let event = NormalizedEvent::push("octocat", "main", ts);

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["author"], "octocat");
        assert_eq!(json["action"], "push");
        assert!(json["from_branch"].is_null());
        assert_eq!(json["to_branch"], "main");
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00.000000Z");
    }

    #[test]
    fn test_stored_event_flattens_record() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let stored = StoredEvent {
            id: "abc".to_string(),
            event: NormalizedEvent::pull_request("octocat", "dev", "main", true, ts),
        };

        let json = serde_json::to_value(&stored).unwrap();

        assert_eq!(json["_id"], "abc");
        assert_eq!(json["action"], "merge");
        assert_eq!(json["from_branch"], "dev");
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00.000000Z");
    }

    #[test]
    fn test_merged_pull_request_becomes_merge() {
        let ts = Utc::now();
        let merged = NormalizedEvent::pull_request("a", "dev", "main", true, ts);
        let open = NormalizedEvent::pull_request("a", "dev", "main", false, ts);

        assert_eq!(merged.action, EventAction::Merge);
        assert_eq!(open.action, EventAction::PullRequest);
        assert_eq!(open.from_branch.as_deref(), Some("dev"));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = serde_json::from_value::<NormalizedEvent>(serde_json::json!({
            "author": "octocat",
            "action": "release",
            "from_branch": null,
            "to_branch": "main",
            "timestamp": "2024-05-01T12:00:00Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_foreign_timestamp_is_normalized() {
        let event: NormalizedEvent = serde_json::from_value(serde_json::json!({
            "author": "octocat",
            "action": "merge",
            "from_branch": "dev",
            "to_branch": "main",
            "timestamp": "2024-05-01T14:00:00+02:00"
        }))
        .unwrap();

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00.000000Z");
    }
}
