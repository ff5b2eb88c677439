use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::model::Predictor;

/// Shared, read-only request state. Built once before the listener binds.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            predictor,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}
