pub mod artifacts;
pub mod classifier;
pub mod normalizer;
pub mod prediction;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ModelError;
use crate::shipment::FeatureVector;

pub use artifacts::ModelArtifacts;
pub use prediction::{Outcome, Prediction};

/// Normalize-then-classify seam the request handler depends on.
///
/// Implementations are read-only after construction and shared across
/// requests without locking.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError>;

    /// What was loaded, for the health endpoint and startup logs.
    fn summary(&self) -> ModelSummary;
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub classifier_kind: &'static str,
    pub normalizer_kind: &'static str,
    pub classifier_sha256: Option<String>,
    pub normalizer_sha256: Option<String>,
    pub loaded_at: DateTime<Utc>,
}
