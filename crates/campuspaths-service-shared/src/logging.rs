//! Logging setup for the campus paths service.
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: `json` (default) or `text`
//! - `RUST_LOG`: filter directives (default: `info`)
//!
//! ```no_run
//! use campuspaths_service_shared::logging::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::from_env()).expect("logging already initialized");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable events.
    Text,
}

impl LogFormat {
    /// "text" and "pretty" select [`LogFormat::Text`]; anything else is JSON.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("text") || value.eq_ignore_ascii_case("pretty") {
            LogFormat::Text
        } else {
            LogFormat::Json
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self { format, level }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Install the global subscriber.
///
/// Errors if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    }
}
