//! Prometheus metrics.

use crate::config::ObservabilitySettings;
use crate::{Error, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Metrics configuration.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Whether the exporter is enabled.
    pub enabled: bool,
    /// Address the scrape listener binds to.
    pub listen_addr: SocketAddr,
}

impl MetricsConfig {
    /// Builds metrics configuration from settings.
    #[must_use]
    pub const fn from_settings(settings: &ObservabilitySettings) -> Self {
        Self {
            enabled: settings.metrics_enabled,
            listen_addr: SocketAddr::new(
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                settings.metrics_port,
            ),
        }
    }
}

/// Installs the Prometheus recorder, with a scrape listener when `expose`
/// is set.
///
/// Returns `None` without installing anything when metrics are disabled;
/// `metrics` macro calls then hit the no-op recorder. The scrape listener
/// runs on the ambient tokio runtime, so `expose` requires one.
///
/// # Errors
///
/// Returns an error if a recorder is already installed, the exporter cannot
/// be built, or `expose` is requested outside a tokio runtime.
pub fn install_prometheus(
    config: &MetricsConfig,
    expose: bool,
) -> Result<Option<PrometheusHandle>> {
    if !config.enabled {
        return Ok(None);
    }

    let handle = if expose {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| Error::OperationFailed {
            operation: "metrics_listener_install".to_string(),
            cause: e.to_string(),
        })?;

        let (recorder, exporter) = {
            let _guard = runtime.enter();
            PrometheusBuilder::new()
                .with_http_listener(config.listen_addr)
                .build()
                .map_err(|e| Error::OperationFailed {
                    operation: "metrics_exporter_build".to_string(),
                    cause: e.to_string(),
                })?
        };
        let handle = recorder.handle();
        metrics::set_global_recorder(recorder).map_err(|e| Error::OperationFailed {
            operation: "metrics_recorder_install".to_string(),
            cause: e.to_string(),
        })?;
        runtime.spawn(exporter);
        handle
    } else {
        PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| Error::OperationFailed {
                operation: "metrics_recorder_install".to_string(),
                cause: e.to_string(),
            })?
    };

    tracing::info!(addr = %config.listen_addr, expose, "Prometheus metrics installed");
    Ok(Some(handle))
}
