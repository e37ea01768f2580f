// Storage layer for the hookfeed control-plane
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - StorageClient: connection lifecycle (open, reconnect, health, close)
// - StorageBackend: enum dispatch over the two backends
// - Database: Postgres JSONB document repository
// - InMemoryDatabase: HashMap-backed store, can be switched offline

pub mod backend;
pub mod client;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use client::{StorageClient, StorageSettings};
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::*;
