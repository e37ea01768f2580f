// Event service for business logic
//
// Central entry point for webhook ingestion and the recent-events query.
// Precondition order for ingestion: storage handle, body, event kind, insert.
// An unusable store therefore wins over a malformed body.

use chrono::{DateTime, Utc};
use hookfeed_core::{normalize, validate_body, EventKind, HookError, StoredEvent};
use std::sync::Arc;

use crate::storage::{models::CreateEventRow, StorageClient};

/// Maximum number of events returned by `recent`
pub const RECENT_EVENTS_LIMIT: usize = 20;

/// Result of a successful ingestion
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// Event was normalized and persisted
    Stored(StoredEvent),
    /// Event kind is not handled; nothing was written
    Ignored { kind: String },
}

pub struct EventService {
    storage: Arc<StorageClient>,
}

impl EventService {
    pub fn new(storage: Arc<StorageClient>) -> Self {
        Self { storage }
    }

    /// Ingest one webhook delivery, stamped with the current server time.
    pub async fn ingest(
        &self,
        kind_header: Option<&str>,
        body: &[u8],
    ) -> Result<IngestOutcome, HookError> {
        self.ingest_at(kind_header, body, Utc::now()).await
    }

    pub async fn ingest_at(
        &self,
        kind_header: Option<&str>,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<IngestOutcome, HookError> {
        let storage = self.storage.ensure_connected().await.inspect_err(|_| {
            tracing::error!("Webhook rejected: document store not available");
        })?;

        let payload = validate_body(body).inspect_err(|e| {
            tracing::warn!(error = %e, body_len = body.len(), "Webhook rejected: invalid body");
        })?;

        let kind = EventKind::from_header(kind_header);
        tracing::info!(kind = %kind, "Received webhook");

        let event = match normalize(&kind, &payload, now) {
            Ok(Some(event)) => event,
            Ok(None) => {
                tracing::info!(kind = %kind, "Ignoring unhandled event type");
                return Ok(IngestOutcome::Ignored {
                    kind: kind.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Webhook rejected: malformed payload");
                return Err(e);
            }
        };

        let row = CreateEventRow::from_event(&event)?;
        let stored = storage.insert_event(row).await.map_err(|e| {
            tracing::error!(
                kind = %kind,
                action = %event.action,
                error = %format!("{e:#}"),
                "Failed to store event"
            );
            HookError::storage(format!("{e:#}"))
        })?;

        tracing::info!(
            id = %stored.id,
            action = %event.action,
            author = %event.author,
            to_branch = %event.to_branch,
            "Stored event"
        );

        Ok(IngestOutcome::Stored(StoredEvent {
            id: stored.id.to_string(),
            event,
        }))
    }

    /// The newest events, at most `RECENT_EVENTS_LIMIT`, newest first.
    pub async fn recent(&self) -> Result<Vec<StoredEvent>, HookError> {
        let storage = self.storage.ensure_connected().await.inspect_err(|_| {
            tracing::error!("Event query rejected: document store not available");
        })?;

        let rows = storage
            .recent_events(RECENT_EVENTS_LIMIT)
            .await
            .map_err(|e| {
                tracing::error!(error = %format!("{e:#}"), "Failed to query events");
                HookError::storage(format!("{e:#}"))
            })?;

        let events = rows
            .into_iter()
            .map(|row| row.into_stored())
            .collect::<serde_json::Result<Vec<_>>>()
            .map_err(|e| {
                tracing::error!(error = %e, "Stored event could not be decoded");
                HookError::storage(e.to_string())
            })?;

        tracing::debug!(count = events.len(), "Fetched recent events");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDatabase;
    use chrono::{Duration, TimeZone};
    use hookfeed_core::EventAction;

    const PUSH: &[u8] = br#"{"ref":"refs/heads/main","pusher":{"name":"octocat"}}"#;

    async fn service() -> (EventService, Arc<InMemoryDatabase>) {
        let (client, db) = StorageClient::in_memory();
        assert!(client.open().await);
        (EventService::new(Arc::new(client)), db)
    }

    #[tokio::test]
    async fn test_ingest_push_is_stored() {
        let (service, db) = service().await;
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let outcome = service.ingest_at(Some("push"), PUSH, now).await.unwrap();

        let IngestOutcome::Stored(stored) = outcome else {
            panic!("expected stored outcome");
        };
        assert_eq!(stored.event.action, EventAction::Push);
        assert_eq!(stored.event.to_branch, "main");
        assert_eq!(stored.event.timestamp, now);
        assert_eq!(db.count_events().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unhandled_kind_writes_nothing() {
        let (service, db) = service().await;

        let outcome = service
            .ingest(Some("issues"), br#"{"action":"opened"}"#)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            IngestOutcome::Ignored {
                kind: "issues".to_string()
            }
        );
        assert_eq!(db.count_events().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_store_checked_before_body() {
        let (client, db) = StorageClient::in_memory();
        db.set_online(false);
        let service = EventService::new(Arc::new(client));

        let err = service.ingest(Some("push"), b"not json").await.unwrap_err();
        assert!(matches!(err, HookError::StorageUnavailable));
    }

    #[tokio::test]
    async fn test_insert_failure_is_storage_error() {
        let (service, db) = service().await;
        db.set_online(false);

        let err = service.ingest(Some("push"), PUSH).await.unwrap_err();
        assert!(matches!(err, HookError::Storage(_)));
        assert!(err.to_string().starts_with("Database error: "));
    }

    #[tokio::test]
    async fn test_malformed_field_is_rejected_before_insert() {
        let (service, db) = service().await;

        let err = service
            .ingest(Some("push"), br#"{"ref": 7}"#)
            .await
            .unwrap_err();

        assert!(matches!(err, HookError::InvalidField { .. }));
        assert_eq!(db.count_events().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_capped() {
        let (service, _db) = service().await;
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        for i in 0..25 {
            service
                .ingest_at(Some("push"), PUSH, base + Duration::seconds(i))
                .await
                .unwrap();
        }

        let events = service.recent().await.unwrap();
        assert_eq!(events.len(), RECENT_EVENTS_LIMIT);
        assert_eq!(events[0].event.timestamp, base + Duration::seconds(24));
        assert_eq!(events[19].event.timestamp, base + Duration::seconds(5));
        assert!(events
            .windows(2)
            .all(|w| w[0].event.timestamp >= w[1].event.timestamp));
    }

    #[tokio::test]
    async fn test_undecodable_document_is_storage_error() {
        let (service, db) = service().await;
        db.insert_event(CreateEventRow {
            document: serde_json::json!({"action": "deploy"}),
        })
        .await
        .unwrap();

        let err = service.recent().await.unwrap_err();
        assert!(matches!(err, HookError::Storage(_)));
        assert!(err.to_string().starts_with("Database error: "));
    }

    #[tokio::test]
    async fn test_recent_empty_store() {
        let (service, _db) = service().await;
        assert!(service.recent().await.unwrap().is_empty());
    }
}
