// Service configuration loaded from environment variables.
// Decision: Every setting has a default so the service starts with no env at all
// Decision: Lookup is injectable so parsing is testable without touching process env

use std::time::Duration;

/// Storage backend selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// PostgreSQL document table (production)
    #[default]
    Postgres,
    /// In-memory store (dev mode, data lost on restart)
    Memory,
}

impl StorageMode {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StorageMode::Memory,
            _ => StorageMode::Postgres,
        }
    }
}

/// Document store connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection URI without credentials in logs (see `redacted_url`)
    pub url: String,
    /// Database name applied on top of the URI
    pub database: String,
    pub max_connections: u32,
    /// Bounds both connect and ping
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432".to_string(),
            database: "github_webhooks".to_string(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl DatabaseConfig {
    /// URI with any password replaced, safe to log
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        match rest.rsplit_once('@') {
            Some((userinfo, host)) => match userinfo.split_once(':') {
                Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
                None => self.url.clone(),
            },
            None => self.url.clone(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_mode: StorageMode,
    pub database: DatabaseConfig,
    pub bind_addr: String,
    /// Empty means same-origin only
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database: DatabaseConfig::default(),
            bind_addr: "0.0.0.0:5000".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment
    ///
    /// Environment variables:
    /// - `STORAGE_BACKEND`: `postgres` (default) or `memory`
    /// - `DATABASE_URL`: connection URI (default: "postgres://localhost:5432")
    /// - `DATABASE_NAME`: database name (default: "github_webhooks")
    /// - `DATABASE_CONNECT_TIMEOUT_SECS`: connect/ping timeout (default: 5)
    /// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `BIND_ADDR`: HTTP listen address (default: "0.0.0.0:5000")
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origins (optional)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = AppConfig::default();

        let storage_mode = var("STORAGE_BACKEND")
            .map(|s| StorageMode::from_str(&s))
            .unwrap_or_default();

        let database = DatabaseConfig {
            url: var("DATABASE_URL").unwrap_or(defaults.database.url),
            database: var("DATABASE_NAME").unwrap_or(defaults.database.database),
            max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.database.max_connections),
            connect_timeout: var("DATABASE_CONNECT_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.database.connect_timeout),
        };

        let cors_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            storage_mode,
            database,
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            cors_origins,
        }
    }
}
