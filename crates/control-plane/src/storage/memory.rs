// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// This implementation provides the same document-store API as the Postgres
// repository, backed by an in-memory HashMap, so the service can run without a
// database. It can also be switched offline to simulate an unreachable store.

use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
pub struct InMemoryDatabase {
    events: RwLock<HashMap<Uuid, EventRow>>,
    online: AtomicBool,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
            online: AtomicBool::new(true),
        }
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle reachability; every operation fails while offline
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(anyhow!("in-memory store is offline"))
        }
    }

    pub async fn ping(&self) -> Result<()> {
        self.check_online()
    }

    // ============================================
    // Events
    // ============================================

    pub async fn insert_event(&self, input: CreateEventRow) -> Result<EventRow> {
        self.check_online()?;
        let id = Uuid::now_v7();
        let row = EventRow {
            id,
            document: input.document,
        };
        self.events.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn recent_events(&self, limit: usize) -> Result<Vec<EventRow>> {
        self.check_online()?;
        let events = self.events.read();
        let mut result: Vec<_> = events.values().cloned().collect();
        result.sort_by(|a, b| {
            b.timestamp_key()
                .cmp(a.timestamp_key())
                .then_with(|| b.id.cmp(&a.id))
        });
        result.truncate(limit);
        Ok(result)
    }

    pub async fn count_events(&self) -> Result<i64> {
        self.check_online()?;
        Ok(self.events.read().len() as i64)
    }
}
