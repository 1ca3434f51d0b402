//! Prometheus metrics infrastructure
//!
//! The `oms` crate only emits through the `metrics` facade; this module
//! installs the recorder that collects those series.

use anyhow::Context;
use config::MetricsConfig;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;

/// Initialize the Prometheus metrics exporter
///
/// This starts an HTTP server on the specified port that exposes metrics
/// at the `/metrics` endpoint. Outside a Tokio runtime the exporter runs
/// its own on a background thread.
///
/// # Example
///
/// ```ignore
/// observability::metrics::init_metrics(9090)?;
/// // Metrics available at http://localhost:9090/metrics
/// ```
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("failed to install Prometheus exporter")?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Install the metrics section of the tracker config, if enabled
pub fn init_metrics_from_config(config: &MetricsConfig) -> anyhow::Result<()> {
    if !config.enabled {
        tracing::debug!("Metrics export disabled");
        return Ok(());
    }
    init_metrics(config.port)
}

/// Install a Prometheus recorder without an HTTP listener
///
/// The returned handle renders the current exposition text, for embedding
/// the tracker's series in an existing endpoint.
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")
}
