// Database models (internal, may differ from public DTOs)
//
// Events are stored as schema-flexible JSON documents keyed by a
// storage-assigned UUID v7.

use hookfeed_core::{NormalizedEvent, StoredEvent};
use sqlx::FromRow;
use uuid::Uuid;

/// Fixed name of the events collection (table)
pub const EVENTS_COLLECTION: &str = "events";

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub document: sqlx::types::JsonValue,
}

#[derive(Debug, Clone)]
pub struct CreateEventRow {
    pub document: sqlx::types::JsonValue,
}

impl CreateEventRow {
    pub fn from_event(event: &NormalizedEvent) -> serde_json::Result<Self> {
        Ok(Self {
            document: serde_json::to_value(event)?,
        })
    }
}

impl EventRow {
    /// Timestamp string used as the sort key, empty if the document has none
    pub fn timestamp_key(&self) -> &str {
        self.document
            .get("timestamp")
            .and_then(|ts| ts.as_str())
            .unwrap_or_default()
    }

    /// Convert to the wire shape: id as a plain string, timestamp re-encoded
    /// in the canonical ISO-8601 "Z" form.
    pub fn into_stored(self) -> serde_json::Result<StoredEvent> {
        let event: NormalizedEvent = serde_json::from_value(self.document)?;
        Ok(StoredEvent {
            id: self.id.to_string(),
            event,
        })
    }
}
