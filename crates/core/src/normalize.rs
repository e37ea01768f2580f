// Webhook payload normalization
//
// One function per event kind turns a raw payload into a NormalizedEvent.
// The timestamp is always supplied by the caller (server time at ingestion),
// never read from the payload.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{HookError, Result};
use crate::event::{NormalizedEvent, NOT_AVAILABLE};
use crate::payload::Payload;

/// Header carrying the event kind
pub const EVENT_HEADER: &str = "X-GitHub-Event";

/// Event kind announced by the webhook header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    /// Any other kind; accepted but not stored
    Other(String),
}

impl EventKind {
    /// Parse the header value. A missing header is an unhandled kind.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("push") => EventKind::Push,
            Some("pull_request") => EventKind::PullRequest,
            Some(other) if !other.is_empty() => EventKind::Other(other.to_string()),
            _ => EventKind::Other("unknown".to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Push => "push",
            EventKind::PullRequest => "pull_request",
            EventKind::Other(kind) => kind,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a request body. It must be JSON and a non-empty object.
pub fn validate_body(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(HookError::InvalidJson);
    }
    let value: Value = serde_json::from_slice(body).map_err(|_| HookError::InvalidJson)?;
    match &value {
        Value::Object(map) if !map.is_empty() => Ok(value),
        _ => Err(HookError::InvalidJson),
    }
}

/// Normalize a payload for the given kind. Unhandled kinds yield `None`.
pub fn normalize(
    kind: &EventKind,
    payload: &Value,
    now: DateTime<Utc>,
) -> Result<Option<NormalizedEvent>> {
    let event = match kind {
        EventKind::Push => normalize_push(payload, now)?,
        EventKind::PullRequest => normalize_pull_request(payload, now)?,
        EventKind::Other(_) => return Ok(None),
    };
    tracing::debug!(
        kind = %kind,
        action = %event.action,
        author = %event.author,
        "Parsed webhook event"
    );
    Ok(Some(event))
}

pub fn normalize_push(payload: &Value, now: DateTime<Utc>) -> Result<NormalizedEvent> {
    let payload = Payload::new(payload);

    let author = payload.str_or(&["pusher", "name"], NOT_AVAILABLE)?;
    let to_branch = payload
        .str_at(&["ref"])?
        .filter(|reference| !reference.is_empty())
        .map(branch_from_ref)
        .unwrap_or(NOT_AVAILABLE);

    Ok(NormalizedEvent::push(author, to_branch, now))
}

/// Closed + merged pull requests become `merge`; every other action is `pull_request`.
pub fn normalize_pull_request(payload: &Value, now: DateTime<Utc>) -> Result<NormalizedEvent> {
    let payload = Payload::new(payload);

    let pr_action = payload.str_at(&["action"])?;
    let author = payload.str_or(&["pull_request", "user", "login"], NOT_AVAILABLE)?;
    let from_branch = payload.str_or(&["pull_request", "head", "ref"], NOT_AVAILABLE)?;
    let to_branch = payload.str_or(&["pull_request", "base", "ref"], NOT_AVAILABLE)?;
    let merged = payload
        .bool_at(&["pull_request", "merged"])?
        .unwrap_or(false);

    let is_merge = pr_action == Some("closed") && merged;

    Ok(NormalizedEvent::pull_request(
        author,
        from_branch,
        to_branch,
        is_merge,
        now,
    ))
}

/// Last "/"-separated segment of a git ref (`refs/heads/main` -> `main`)
pub fn branch_from_ref(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
