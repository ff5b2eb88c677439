//! Pre-fitted scaling transforms applied to the feature vector before
//! inference. Parameters come from the normalizer artifact; nothing here
//! fits or refits.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const STAGE: &str = "normalizer";

/// On-disk normalizer artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerArtifact {
    pub feature_names: Vec<String>,
    pub transform: ScalingTransform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
    Max,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalingTransform {
    /// `(x - mean) / scale`
    StandardScaler { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMaxScaler { min: Vec<f64>, scale: Vec<f64> },
    /// Rescale the whole row to unit norm.
    Normalizer { norm: Norm },
}

impl ScalingTransform {
    pub fn kind(&self) -> &'static str {
        match self {
            ScalingTransform::StandardScaler { .. } => "standard_scaler",
            ScalingTransform::MinMaxScaler { .. } => "min_max_scaler",
            ScalingTransform::Normalizer { .. } => "normalizer",
        }
    }

    /// Checks parameter widths against `width` features.
    pub fn validate(&self, width: usize) -> Result<(), String> {
        let check = |name: &str, values: &[f64]| {
            if values.len() != width {
                return Err(format!("{name} has {} entries, expected {width}", values.len()));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(format!("{name} contains non-finite values"));
            }
            Ok(())
        };
        match self {
            ScalingTransform::StandardScaler { mean, scale } => {
                check("mean", mean)?;
                check("scale", scale)
            }
            ScalingTransform::MinMaxScaler { min, scale } => {
                check("min", min)?;
                check("scale", scale)
            }
            ScalingTransform::Normalizer { .. } => Ok(()),
        }
    }

    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        let out = match self {
            ScalingTransform::StandardScaler { mean, scale } => {
                expect_width(x, mean.len())?;
                x.iter()
                    .zip(mean.iter().zip(scale))
                    .map(|(v, (m, s))| {
                        // Constant columns are fitted with scale 0; leave them centred only
                        let s = if *s == 0.0 { 1.0 } else { *s };
                        (v - m) / s
                    })
                    .collect::<Vec<_>>()
            }
            ScalingTransform::MinMaxScaler { min, scale } => {
                expect_width(x, min.len())?;
                x.iter()
                    .zip(min.iter().zip(scale))
                    .map(|(v, (m, s))| v * s + m)
                    .collect()
            }
            ScalingTransform::Normalizer { norm } => {
                let n = match norm {
                    Norm::L1 => x.iter().map(|v| v.abs()).sum::<f64>(),
                    Norm::L2 => x.iter().map(|v| v * v).sum::<f64>().sqrt(),
                    Norm::Max => x.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())),
                };
                if n == 0.0 {
                    x.to_vec()
                } else {
                    x.iter().map(|v| v / n).collect()
                }
            }
        };

        if out.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite { stage: STAGE });
        }
        Ok(out)
    }
}

fn expect_width(x: &[f64], expected: usize) -> Result<(), ModelError> {
    if x.len() != expected {
        return Err(ModelError::Dimension {
            stage: STAGE,
            expected,
            actual: x.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn standard_scaler_centres_and_scales() {
        let t = ScalingTransform::StandardScaler {
            mean: vec![1.0, 10.0, 5.0],
            scale: vec![2.0, 5.0, 0.0],
        };
        let out = t.transform(&[3.0, 0.0, 7.0]).unwrap();
        assert!(close(&out, &[1.0, -2.0, 2.0]));
    }

    #[test]
    fn min_max_scaler_is_affine() {
        let t = ScalingTransform::MinMaxScaler {
            min: vec![0.0, -1.0],
            scale: vec![0.5, 0.01],
        };
        let out = t.transform(&[4.0, 200.0]).unwrap();
        assert!(close(&out, &[2.0, 1.0]));
    }

    #[test]
    fn row_normalizer_norms() {
        let row = [3.0, -4.0];
        let l2 = ScalingTransform::Normalizer { norm: Norm::L2 };
        assert!(close(&l2.transform(&row).unwrap(), &[0.6, -0.8]));

        let l1 = ScalingTransform::Normalizer { norm: Norm::L1 };
        assert!(close(&l1.transform(&row).unwrap(), &[3.0 / 7.0, -4.0 / 7.0]));

        let max = ScalingTransform::Normalizer { norm: Norm::Max };
        assert!(close(&max.transform(&row).unwrap(), &[0.75, -1.0]));

        // zero rows pass through untouched
        assert!(close(&l2.transform(&[0.0, 0.0]).unwrap(), &[0.0, 0.0]));
    }

    #[test]
    fn width_mismatch_is_a_model_error() {
        let t = ScalingTransform::StandardScaler {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        assert_eq!(
            t.transform(&[1.0, 2.0]).unwrap_err(),
            ModelError::Dimension { stage: "normalizer", expected: 3, actual: 2 }
        );
    }

    #[test]
    fn validate_checks_widths() {
        let t = ScalingTransform::MinMaxScaler {
            min: vec![0.0; 10],
            scale: vec![1.0; 9],
        };
        let err = t.validate(10).unwrap_err();
        assert!(err.contains("scale has 9 entries"));
        assert!(ScalingTransform::Normalizer { norm: Norm::L2 }.validate(10).is_ok());
    }

    #[test]
    fn parses_tagged_json() {
        let json = r#"{
            "feature_names": ["a", "b"],
            "transform": { "kind": "normalizer", "norm": "l2" }
        }"#;
        let artifact: NormalizerArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.transform.kind(), "normalizer");
        assert_eq!(artifact.feature_names, vec!["a", "b"]);
    }
}
