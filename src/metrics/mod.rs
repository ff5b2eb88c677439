//! Service metrics, organized by phase.
//!
//! Each phase owns a submodule that registers and documents its metrics, so
//! names stay unique and follow one convention.

pub mod predict;
pub mod registry;
pub mod startup;

pub use predict::PredictMetrics;
pub use startup::StartupMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};
use tracing::{info, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and register every phase's metrics.
///
/// Idempotent. Returns the handle used to render `GET /metrics`, or `None`
/// when another recorder was already installed in this process.
pub fn init_metrics() -> Option<PrometheusHandle> {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("METRICS: handle already stored");
            }
            registry::register_all_metrics();
            info!("Prometheus recorder installed");
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
        }
    });
    HANDLE.get().cloned()
}

/// Implemented by each phase's metrics collection.
pub trait PhaseMetrics {
    /// Pre-register so every series shows up before its first event.
    fn register_metrics();

    fn phase_name() -> &'static str;

    fn metrics_documentation() -> Vec<MetricDoc>;
}

#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    #[allow(dead_code)]
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub enum MetricType {
    Counter,
    Histogram,
    Gauge,
}

/// Naming convention: `eta_{phase}_{metric_name}[_total]`
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("eta_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("eta_", $phase, "_", $name)
    };
    (gauge, $phase:literal, $name:literal) => {
        concat!("eta_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;
