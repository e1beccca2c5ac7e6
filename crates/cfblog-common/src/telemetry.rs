//! Tracing setup for cfblog binaries.
//!
//! Logs go to stderr so the CLI can print rendered HTML on stdout.
//!
//! ```ignore
//! use cfblog_common::telemetry::{self, TelemetryConfig};
//!
//! telemetry::init(TelemetryConfig::from_env("cfblog-server"));
//! tracing::info!("server started");
//! ```

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for labeling (e.g., "cfblog-server", "cfblog")
    pub service_name: String,
    /// Console log level (default: INFO, DEBUG in debug builds)
    pub console_level: Level,
}

impl TelemetryConfig {
    /// Load config from environment variables.
    ///
    /// - `RUST_LOG`: Standard env filter (optional, overrides console_level)
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        Self {
            service_name: service_name.into(),
            console_level,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{},hyper=info,reqwest=info",
                self.console_level.as_str().to_lowercase()
            ))
        })
    }
}

/// Install the global tracing subscriber.
///
/// Call once at application startup. A second call logs a warning and leaves
/// the first subscriber in place.
pub fn init(config: TelemetryConfig) {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(config.env_filter());

    match tracing_subscriber::registry().with(console_layer).try_init() {
        Ok(()) => tracing::debug!(service = %config.service_name, "telemetry initialized"),
        Err(e) => tracing::warn!(error = %e, "tracing subscriber already installed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_level_overrides_default() {
        let config = TelemetryConfig::from_env("test").with_level(Level::WARN);
        assert_eq!(config.console_level, Level::WARN);
        assert_eq!(config.service_name, "test");
    }
}
