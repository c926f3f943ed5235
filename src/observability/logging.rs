//! Structured logging.

use crate::config::ObservabilitySettings;
use crate::{Error, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output for terminals.
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers.
    Json,
}

impl LogFormat {
    /// Parses a format name; anything unrecognized falls back to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Default filter directive when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl LoggingConfig {
    /// Builds logging configuration from settings and the CLI verbose flag.
    #[must_use]
    pub fn from_settings(settings: &ObservabilitySettings, verbose: bool) -> Self {
        Self {
            format: LogFormat::parse(&settings.log_format),
            default_filter: if verbose { "debug" } else { "info" }.to_string(),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// The filter honours `RUST_LOG` when set and falls back to the configured
/// default level otherwise.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let init_error = |e: tracing_subscriber::util::TryInitError| Error::OperationFailed {
        operation: "logging_init".to_string(),
        cause: e.to_string(),
    };

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init()
            .map_err(init_error),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
            .map_err(init_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("anything-else"), LogFormat::Pretty);
    }

    #[test]
    fn test_from_settings_verbose_lowers_filter() {
        let settings = ObservabilitySettings::default();
        let quiet = LoggingConfig::from_settings(&settings, false);
        let verbose = LoggingConfig::from_settings(&settings, true);
        assert_eq!(quiet.default_filter, "info");
        assert_eq!(verbose.default_filter, "debug");
        assert_eq!(quiet.format, LogFormat::Pretty);
    }
}
