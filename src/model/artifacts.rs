use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::constants::{FEATURE_COUNT, FEATURE_NAMES};
use crate::error::{ArtifactError, ModelError};
use crate::model::classifier::{Classifier, ClassifierArtifact};
use crate::model::normalizer::{NormalizerArtifact, ScalingTransform};
use crate::model::prediction::{Outcome, Prediction};
use crate::model::{ModelSummary, Predictor};
use crate::shipment::FeatureVector;

const CLASSIFIER: &str = "classifier artifact";
const NORMALIZER: &str = "normalizer artifact";

/// The loaded normalizer and classifier. Immutable once built.
#[derive(Debug)]
pub struct ModelArtifacts {
    normalizer: ScalingTransform,
    classifier: Classifier,
    summary: ModelSummary,
}

impl ModelArtifacts {
    /// Reads, parses and validates both artifact files.
    pub fn load(model_path: &Path, normalizer_path: &Path) -> Result<Self, ArtifactError> {
        let (classifier, model_digest): (ClassifierArtifact, _) = read_json(model_path)?;
        let (normalizer, normalizer_digest): (NormalizerArtifact, _) = read_json(normalizer_path)?;

        let mut artifacts = Self::from_parts(classifier, normalizer)?;
        artifacts.summary.classifier_sha256 = Some(model_digest);
        artifacts.summary.normalizer_sha256 = Some(normalizer_digest);

        info!(
            classifier = artifacts.summary.classifier_kind,
            normalizer = artifacts.summary.normalizer_kind,
            model_path = %model_path.display(),
            normalizer_path = %normalizer_path.display(),
            classifier_sha256 = artifacts.summary.classifier_sha256.as_deref().unwrap_or(""),
            normalizer_sha256 = artifacts.summary.normalizer_sha256.as_deref().unwrap_or(""),
            "Model artifacts loaded"
        );
        Ok(artifacts)
    }

    /// Validates already-parsed artifacts against the pinned feature order.
    pub fn from_parts(
        classifier: ClassifierArtifact,
        normalizer: NormalizerArtifact,
    ) -> Result<Self, ArtifactError> {
        check_feature_order(CLASSIFIER, &classifier.feature_names)?;
        check_feature_order(NORMALIZER, &normalizer.feature_names)?;

        normalizer
            .transform
            .validate(FEATURE_COUNT)
            .map_err(|reason| ArtifactError::Invalid { artifact: NORMALIZER, reason })?;
        classifier
            .model
            .validate(FEATURE_COUNT)
            .map_err(|reason| ArtifactError::Invalid { artifact: CLASSIFIER, reason })?;

        let summary = ModelSummary {
            classifier_kind: classifier.model.kind(),
            normalizer_kind: normalizer.transform.kind(),
            classifier_sha256: None,
            normalizer_sha256: None,
            loaded_at: Utc::now(),
        };

        Ok(Self {
            normalizer: normalizer.transform,
            classifier: classifier.model,
            summary,
        })
    }
}

impl Predictor for ModelArtifacts {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        let scaled = self.normalizer.transform(features.as_slice())?;
        debug!(transformed = ?scaled, "Normalized features");

        let probabilities = self.classifier.predict_proba(&scaled)?;
        Ok(Prediction {
            outcome: Outcome::from_probabilities(probabilities),
            probabilities,
        })
    }

    fn summary(&self) -> ModelSummary {
        self.summary.clone()
    }
}

fn check_feature_order(artifact: &'static str, names: &[String]) -> Result<(), ArtifactError> {
    for position in 0..FEATURE_COUNT.max(names.len()) {
        let expected = FEATURE_NAMES.get(position).copied();
        let found = names.get(position).map(String::as_str);
        if expected != found {
            return Err(ArtifactError::FeatureOrder {
                artifact,
                position,
                expected: expected.unwrap_or("<end>").to_string(),
                found: found.unwrap_or("<end>").to_string(),
            });
        }
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<(T, String), ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    let digest = hex::encode(Sha256::digest(&bytes));
    let parsed = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Json {
        path: PathBuf::from(path),
        source,
    })?;
    Ok((parsed, digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classifier::{DecisionTree, RandomForest, LEAF};
    use crate::model::normalizer::Norm;

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    /// Splits on Discount_offered (index 8) after L2 normalization.
    fn forest() -> ClassifierArtifact {
        ClassifierArtifact {
            feature_names: names(),
            model: Classifier::RandomForest(RandomForest {
                trees: vec![DecisionTree {
                    children_left: vec![1, LEAF, LEAF],
                    children_right: vec![2, LEAF, LEAF],
                    feature: vec![8, -2, -2],
                    threshold: vec![0.05, -2.0, -2.0],
                    value: vec![[50.0, 50.0], [30.0, 10.0], [5.0, 45.0]],
                }],
            }),
        }
    }

    fn l2() -> NormalizerArtifact {
        NormalizerArtifact {
            feature_names: names(),
            transform: ScalingTransform::Normalizer { norm: Norm::L2 },
        }
    }

    #[test]
    fn rejects_reordered_feature_names() {
        let mut classifier = forest();
        classifier.feature_names.swap(2, 3);
        let err = ModelArtifacts::from_parts(classifier, l2()).unwrap_err();
        match err {
            ArtifactError::FeatureOrder { artifact, position, expected, found } => {
                assert_eq!(artifact, "classifier artifact");
                assert_eq!(position, 2);
                assert_eq!(expected, "Customer_care_calls");
                assert_eq!(found, "Customer_rating");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_truncated_feature_names() {
        let mut normalizer = l2();
        normalizer.feature_names.pop();
        let err = ModelArtifacts::from_parts(forest(), normalizer).unwrap_err();
        assert!(matches!(err, ArtifactError::FeatureOrder { position: 9, .. }));
    }

    #[test]
    fn rejects_wrong_width_scaler() {
        let normalizer = NormalizerArtifact {
            feature_names: names(),
            transform: ScalingTransform::StandardScaler {
                mean: vec![0.0; 9],
                scale: vec![1.0; 9],
            },
        };
        let err = ModelArtifacts::from_parts(forest(), normalizer).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { artifact: "normalizer artifact", .. }));
    }

    #[test]
    fn predictions_are_deterministic_and_normalized() {
        let artifacts = ModelArtifacts::from_parts(forest(), l2()).unwrap();
        let features = FeatureVector::from(&crate::shipment::ShipmentRecord {
            warehouse_block: crate::shipment::WarehouseBlock::A,
            mode_of_shipment: crate::shipment::ShipmentMode::Flight,
            customer_care_calls: 4,
            customer_rating: 2,
            cost_of_the_product: 200,
            prior_purchases: 3,
            product_importance: crate::shipment::ProductImportance::Low,
            gender: crate::shipment::Gender::Female,
            discount_offered: 10,
            weight_in_gms: 1500,
        });

        let first = artifacts.predict(&features).unwrap();
        let second = artifacts.predict(&features).unwrap();
        assert_eq!(first, second);
        // 10 / |v| is well under the 0.05 split, so the left leaf decides
        assert_eq!(first.outcome, Outcome::Late);
        assert!((first.no_reach_percent() - 75.0).abs() < 1e-9);
        assert!((first.reach_percent() + first.no_reach_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("classifier.json");
        let norm = dir.path().join("normalizer.json");

        let err = ModelArtifacts::load(&model, &norm).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));

        fs::write(&model, serde_json::to_vec(&forest()).unwrap()).unwrap();
        fs::write(&norm, b"{ not json").unwrap();
        let err = ModelArtifacts::load(&model, &norm).unwrap_err();
        assert!(matches!(err, ArtifactError::Json { .. }));

        fs::write(&norm, serde_json::to_vec(&l2()).unwrap()).unwrap();
        let artifacts = ModelArtifacts::load(&model, &norm).unwrap();
        let summary = artifacts.summary();
        assert_eq!(summary.classifier_kind, "random_forest");
        assert_eq!(summary.normalizer_kind, "normalizer");
        assert_eq!(summary.classifier_sha256.as_deref().map(str::len), Some(64));
    }
}
