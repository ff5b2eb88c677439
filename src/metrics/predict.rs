//! Prediction phase metrics: requests served, outcomes, rejections and
//! inference latency.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};
use crate::model::Outcome;

pub struct PredictMetrics;

impl PredictMetrics {
    pub fn record_success(outcome: Outcome, duration_secs: f64) {
        let outcome = match outcome {
            Outcome::OnTime => "on_time",
            Outcome::Late => "late",
        };
        ::metrics::counter!(phase_metric!(counter, "predict", "requests")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "predict", "outcomes"), "outcome" => outcome)
            .increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "predict", "duration_seconds"))
            .record(duration_secs);
    }

    /// Client-side rejection (missing field, bad category, bad number).
    pub fn record_rejected(reason: &'static str) {
        ::metrics::counter!(phase_metric!(counter, "predict", "requests")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "predict", "rejected"), "reason" => reason)
            .increment(1);
    }

    pub fn record_failure() {
        ::metrics::counter!(phase_metric!(counter, "predict", "requests")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "predict", "failures")).increment(1);
    }
}

impl PhaseMetrics for PredictMetrics {
    fn register_metrics() {
        use metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "predict", "requests"));
        let _ = counter!(phase_metric!(counter, "predict", "failures"));
        let _ = histogram!(phase_metric!(histogram, "predict", "duration_seconds"));
    }

    fn phase_name() -> &'static str {
        "predict"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "predict", "requests"),
                metric_type: MetricType::Counter,
                help: "Total number of prediction requests received",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "predict", "outcomes"),
                metric_type: MetricType::Counter,
                help: "Predictions served, by predicted outcome",
                labels: vec!["outcome"],
            },
            MetricDoc {
                name: phase_metric!(counter, "predict", "rejected"),
                metric_type: MetricType::Counter,
                help: "Requests rejected with 400 because of invalid form input",
                labels: vec!["reason"],
            },
            MetricDoc {
                name: phase_metric!(counter, "predict", "failures"),
                metric_type: MetricType::Counter,
                help: "Requests that failed inside the normalizer or classifier",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "predict", "duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Time spent normalizing and classifying one shipment",
                labels: vec![],
            },
        ]
    }
}
