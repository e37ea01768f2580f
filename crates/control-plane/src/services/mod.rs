// Services layer for business logic
// Services own ingestion and query rules, calling storage through the client

pub mod event;

pub use event::{EventService, IngestOutcome, RECENT_EVENTS_LIMIT};
