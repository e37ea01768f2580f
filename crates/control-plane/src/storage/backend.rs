// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use std::sync::Arc;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::Postgres(db) => db.ping().await,
            Self::InMemory(db) => db.ping().await,
        }
    }

    /// Prepare the events collection. No-op for the in-memory backend.
    pub async fn ensure_schema(&self) -> Result<()> {
        match self {
            Self::Postgres(db) => db.ensure_schema().await,
            Self::InMemory(_) => Ok(()),
        }
    }

    pub async fn close(&self) {
        if let Self::Postgres(db) = self {
            db.close().await;
        }
    }

    // ============================================
    // Events
    // ============================================

    pub async fn insert_event(&self, input: CreateEventRow) -> Result<EventRow> {
        match self {
            Self::Postgres(db) => db.insert_event(input).await,
            Self::InMemory(db) => db.insert_event(input).await,
        }
    }

    pub async fn recent_events(&self, limit: usize) -> Result<Vec<EventRow>> {
        match self {
            Self::Postgres(db) => db.recent_events(limit).await,
            Self::InMemory(db) => db.recent_events(limit).await,
        }
    }

    pub async fn count_events(&self) -> Result<i64> {
        match self {
            Self::Postgres(db) => db.count_events().await,
            Self::InMemory(db) => db.count_events().await,
        }
    }
}
