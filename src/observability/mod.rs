//! Observability and telemetry.
//!
//! One-shot process initialization for structured logging and the optional
//! Prometheus exporter. Library code only ever uses the `tracing` and
//! `metrics` macros; everything here wires the backends for them.

mod logging;
mod metrics;

pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use metrics::{MetricsConfig, install_prometheus};

use crate::Result;
use crate::config::ObservabilitySettings;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::OnceLock;

/// Options for observability initialization.
#[derive(Debug, Clone, Copy)]
pub struct InitOptions {
    /// Whether verbose output was requested via the CLI.
    pub verbose: bool,
    /// Whether to expose the metrics scrape listener.
    ///
    /// Only the long-running `serve` command exposes it; one-shot commands
    /// record into the plain recorder.
    pub metrics_expose: bool,
}

/// Handle to the installed observability components.
pub struct ObservabilityHandle {
    metrics: Option<PrometheusHandle>,
}

impl ObservabilityHandle {
    /// Renders the current metrics in Prometheus exposition format, if the
    /// exporter is installed.
    #[must_use]
    pub fn render_metrics(&self) -> Option<String> {
        self.metrics.as_ref().map(PrometheusHandle::render)
    }
}

static OBSERVABILITY_INIT: OnceLock<()> = OnceLock::new();

/// Initializes logging and metrics from the configured settings.
///
/// # Errors
///
/// Returns an error if observability has already been initialized or a
/// component fails to install.
pub fn init_from_config(
    settings: &ObservabilitySettings,
    options: InitOptions,
) -> Result<ObservabilityHandle> {
    if OBSERVABILITY_INIT.get().is_some() {
        return Err(crate::Error::OperationFailed {
            operation: "observability_init".to_string(),
            cause: "observability already initialized".to_string(),
        });
    }

    let logging_config = LoggingConfig::from_settings(settings, options.verbose);
    init_logging(&logging_config)?;

    let metrics_config = MetricsConfig::from_settings(settings);
    let metrics = install_prometheus(&metrics_config, options.metrics_expose)?;

    let _ = OBSERVABILITY_INIT.set(());

    Ok(ObservabilityHandle { metrics })
}
