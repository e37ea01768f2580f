// Logging setup
//
// Installs a tracing-subscriber registry with an EnvFilter and a fmt layer.
// Output is human-readable by default, JSON lines when LOG_FORMAT=json.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Default filter when neither RUST_LOG nor LOG_LEVEL is set
pub const DEFAULT_LOG_FILTER: &str = "hookfeed_control_plane=debug,tower_http=debug";

/// Configuration for log output
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,
    /// Log filter (e.g., "info", "debug", "hookfeed_control_plane=debug")
    pub log_filter: Option<String>,
    /// Emit JSON lines instead of the pretty format
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "hookfeed-control-plane".to_string(),
            log_filter: None,
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `SERVICE_NAME`: Service name (default: "hookfeed-control-plane")
    /// - `RUST_LOG` or `LOG_LEVEL`: Log filter
    /// - `LOG_FORMAT`: "json" for JSON lines
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            service_name: lookup("SERVICE_NAME")
                .unwrap_or_else(|| "hookfeed-control-plane".to_string()),
            log_filter: lookup("RUST_LOG").or_else(|| lookup("LOG_LEVEL")),
            json: lookup("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        self.log_filter
            .as_ref()
            .and_then(|f| EnvFilter::try_new(f).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

/// Initialize the global subscriber. Call once, early in `main`.
pub fn init_telemetry(config: TelemetryConfig) {
    let console_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(config.env_filter())
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(config.env_filter())
            .boxed()
    };

    tracing_subscriber::registry().with(console_layer).init();

    tracing::debug!(
        service = %config.service_name,
        json = config.json,
        "Logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_prefers_rust_log() {
        let config = TelemetryConfig::from_lookup(|key| match key {
            "RUST_LOG" => Some("warn".to_string()),
            "LOG_LEVEL" => Some("debug".to_string()),
            "LOG_FORMAT" => Some("JSON".to_string()),
            _ => None,
        });

        assert_eq!(config.log_filter.as_deref(), Some("warn"));
        assert!(config.json);
        assert_eq!(config.service_name, "hookfeed-control-plane");
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = TelemetryConfig::from_lookup(|_| None);
        assert!(config.log_filter.is_none());
        assert!(!config.json);
    }
}
