//! Startup phase metrics: artifact loading.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct StartupMetrics;

impl StartupMetrics {
    pub fn record_artifacts_loaded(duration_secs: f64) {
        ::metrics::histogram!(phase_metric!(histogram, "startup", "artifact_load_seconds"))
            .record(duration_secs);
        ::metrics::gauge!(phase_metric!(gauge, "startup", "artifacts_loaded")).set(1.0);
    }
}

impl PhaseMetrics for StartupMetrics {
    fn register_metrics() {
        use metrics::{gauge, histogram};

        let _ = histogram!(phase_metric!(histogram, "startup", "artifact_load_seconds"));
        let _ = gauge!(phase_metric!(gauge, "startup", "artifacts_loaded"));
    }

    fn phase_name() -> &'static str {
        "startup"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(histogram, "startup", "artifact_load_seconds"),
                metric_type: MetricType::Histogram,
                help: "Time taken to read and validate both model artifacts",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(gauge, "startup", "artifacts_loaded"),
                metric_type: MetricType::Gauge,
                help: "1 once the normalizer and classifier are loaded",
                labels: vec![],
            },
        ]
    }
}
