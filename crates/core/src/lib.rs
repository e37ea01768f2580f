// Webhook Event Abstractions
//
// This crate turns raw source-control webhook payloads into normalized events.
//
// Key design decisions:
// - No I/O here: storage and HTTP live in hookfeed-control-plane
// - Payloads are read through path accessors with per-field defaults,
//   so unknown or partial payloads never fail unless a field has the wrong shape
// - Timestamps are server-assigned and always encoded as ISO-8601 UTC with "Z"
// - Errors carry a class (validation / storage / unexpected) for status mapping

pub mod error;
pub mod event;
pub mod normalize;
pub mod payload;
pub mod timestamp;

// Re-exports for convenience
pub use error::{ErrorClass, HookError, Result};
pub use event::{EventAction, NormalizedEvent, StoredEvent, NOT_AVAILABLE};
pub use normalize::{normalize, validate_body, EventKind, EVENT_HEADER};
pub use payload::Payload;
pub use timestamp::{format_iso_utc, parse_iso_utc};
