// Storage client: owns the connection lifecycle
// Decision: One shared client injected into services instead of a global handle
// Decision: A missing handle triggers exactly one reconnect attempt per request
//
// Connection failures never abort the process. The service starts without a
// store and recovers lazily on the next request that needs one.

use anyhow::{Context, Result};
use hookfeed_core::HookError;
use parking_lot::RwLock;
use std::sync::Arc;

use super::backend::StorageBackend;
use super::memory::InMemoryDatabase;
use super::repositories::Database;
use crate::config::{AppConfig, DatabaseConfig, StorageMode};

/// How to (re)establish the storage handle
#[derive(Clone)]
pub enum StorageSettings {
    Postgres(DatabaseConfig),
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.storage_mode {
            StorageMode::Postgres => Self::Postgres(config.database.clone()),
            StorageMode::Memory => Self::InMemory(Arc::new(InMemoryDatabase::new())),
        }
    }

    /// Target description without credentials
    pub fn describe(&self) -> String {
        match self {
            Self::Postgres(db) => format!("{} (database {})", db.redacted_url(), db.database),
            Self::InMemory(_) => "in-memory".to_string(),
        }
    }
}

/// Current handle plus a counter bumped on every successful open
#[derive(Default)]
struct HandleSlot {
    backend: Option<StorageBackend>,
    generation: u64,
}

pub struct StorageClient {
    settings: StorageSettings,
    handle: RwLock<HandleSlot>,
}

impl StorageClient {
    /// Create a client without connecting. Call `open` to connect.
    pub fn new(settings: StorageSettings) -> Self {
        Self {
            settings,
            handle: RwLock::new(HandleSlot::default()),
        }
    }

    /// Client over a fresh in-memory store (dev mode and tests)
    pub fn in_memory() -> (Self, Arc<InMemoryDatabase>) {
        let db = Arc::new(InMemoryDatabase::new());
        (Self::new(StorageSettings::InMemory(db.clone())), db)
    }

    pub fn describe(&self) -> String {
        self.settings.describe()
    }

    /// Connect, verify with a ping and prepare the events collection.
    /// Returns whether a usable handle is now held.
    pub async fn open(&self) -> bool {
        let started = self.generation();
        match self.try_open().await {
            Ok(backend) => {
                tracing::info!(
                    target_store = %self.describe(),
                    dev_mode = backend.is_dev_mode(),
                    "Connected to document store"
                );
                self.store_success(backend);
                true
            }
            Err(e) => {
                tracing::error!(
                    target_store = %self.describe(),
                    error = %format!("{e:#}"),
                    "Failed to connect to document store"
                );
                self.store_failure(started);
                false
            }
        }
    }

    fn generation(&self) -> u64 {
        self.handle.read().generation
    }

    fn store_success(&self, backend: StorageBackend) {
        let mut slot = self.handle.write();
        slot.backend = Some(backend);
        slot.generation += 1;
    }

    /// Clear the handle unless another open succeeded after `started`
    fn store_failure(&self, started: u64) {
        let mut slot = self.handle.write();
        if slot.generation == started {
            slot.backend = None;
        }
    }

    async fn try_open(&self) -> Result<StorageBackend> {
        let backend = match &self.settings {
            StorageSettings::Postgres(config) => StorageBackend::Postgres(
                Database::connect(config)
                    .await
                    .context("Failed to open connection pool")?,
            ),
            StorageSettings::InMemory(db) => StorageBackend::InMemory(db.clone()),
        };
        backend.ping().await.context("Ping failed")?;
        backend
            .ensure_schema()
            .await
            .context("Failed to prepare events collection")?;
        Ok(backend)
    }

    /// Current handle, if any
    pub fn current(&self) -> Option<StorageBackend> {
        self.handle.read().backend.clone()
    }

    /// Handle for a request, reconnecting once if none is held
    pub async fn ensure_connected(&self) -> std::result::Result<StorageBackend, HookError> {
        if let Some(backend) = self.current() {
            return Ok(backend);
        }

        tracing::warn!("No storage handle, attempting to reconnect");
        if self.open().await {
            if let Some(backend) = self.current() {
                return Ok(backend);
            }
        }
        Err(HookError::StorageUnavailable)
    }

    /// Handle present and answering pings
    pub async fn is_healthy(&self) -> bool {
        match self.current() {
            Some(backend) => backend.ping().await.is_ok(),
            None => false,
        }
    }

    /// Drop the handle and close the underlying pool
    pub async fn close(&self) {
        let backend = self.handle.write().backend.take();
        if let Some(backend) = backend {
            backend.close().await;
            tracing::info!("Document store connection closed");
        }
    }
}
