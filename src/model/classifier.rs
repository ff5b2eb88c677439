//! Binary classifiers loaded from the classifier artifact.
//!
//! Class 0 is "will not reach on time", class 1 is "reaches on time".

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const STAGE: &str = "classifier";

/// Marker for a leaf in the flat child arrays.
pub const LEAF: i64 = -1;

/// On-disk classifier artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub feature_names: Vec<String>,
    pub model: Classifier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

/// Averaged ensemble of decision trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

/// A fitted tree stored as parallel node arrays. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights (counts or fractions) for classes 0 and 1.
    pub value: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl Classifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Classifier::RandomForest(_) => "random_forest",
            Classifier::LogisticRegression(_) => "logistic_regression",
        }
    }

    pub fn validate(&self, width: usize) -> Result<(), String> {
        match self {
            Classifier::RandomForest(forest) => {
                if forest.trees.is_empty() {
                    return Err("forest has no trees".to_string());
                }
                for (i, tree) in forest.trees.iter().enumerate() {
                    tree.validate(width).map_err(|e| format!("tree {i}: {e}"))?;
                }
                Ok(())
            }
            Classifier::LogisticRegression(lr) => {
                if lr.coef.len() != width {
                    return Err(format!(
                        "coef has {} entries, expected {width}",
                        lr.coef.len()
                    ));
                }
                if !lr.intercept.is_finite() || lr.coef.iter().any(|c| !c.is_finite()) {
                    return Err("coefficients contain non-finite values".to_string());
                }
                Ok(())
            }
        }
    }

    /// Class probabilities `[p0, p1]`, clamped and summing to 1.
    pub fn predict_proba(&self, x: &[f64]) -> Result<[f64; 2], ModelError> {
        let raw = match self {
            Classifier::RandomForest(forest) => forest.predict_proba(x)?,
            Classifier::LogisticRegression(lr) => lr.predict_proba(x)?,
        };
        renormalize(raw)
    }
}

impl RandomForest {
    pub fn predict_proba(&self, x: &[f64]) -> Result<[f64; 2], ModelError> {
        let mut sum = [0.0; 2];
        for tree in &self.trees {
            let [a, b] = tree.predict_proba(x)?;
            sum[0] += a;
            sum[1] += b;
        }
        let n = self.trees.len().max(1) as f64;
        Ok([sum[0] / n, sum[1] / n])
    }
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF
    }

    /// Structural checks that make `leaf_for` total: consistent array
    /// lengths, children strictly after their parent, split features inside
    /// the vector, usable leaf weights.
    pub fn validate(&self, width: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        let lens = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lens.iter().any(|&l| l != n) {
            return Err(format!("node arrays have mismatched lengths (expected {n})"));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {node} has exactly one child"));
                }
                let [a, b] = self.value[node];
                if !(a >= 0.0 && b >= 0.0 && a + b > 0.0) || !(a + b).is_finite() {
                    return Err(format!("leaf {node} has unusable class weights"));
                }
                continue;
            }
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} points at invalid child {child}"));
                }
            }
            let f = self.feature[node];
            if f < 0 || f as usize >= width {
                return Err(format!("node {node} splits on feature {f}, outside 0..{width}"));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {node} has a NaN threshold"));
            }
        }
        Ok(())
    }

    fn leaf_for(&self, x: &[f64]) -> Result<usize, ModelError> {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let f = self.feature[node] as usize;
            let v = *x.get(f).ok_or(ModelError::Dimension {
                stage: STAGE,
                expected: f + 1,
                actual: x.len(),
            })?;
            node = if v <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        Ok(node)
    }

    pub fn predict_proba(&self, x: &[f64]) -> Result<[f64; 2], ModelError> {
        let [a, b] = self.value[self.leaf_for(x)?];
        let total = a + b;
        Ok([a / total, b / total])
    }
}

impl LogisticRegression {
    pub fn predict_proba(&self, x: &[f64]) -> Result<[f64; 2], ModelError> {
        if x.len() != self.coef.len() {
            return Err(ModelError::Dimension {
                stage: STAGE,
                expected: self.coef.len(),
                actual: x.len(),
            });
        }
        let z: f64 = self.intercept + self.coef.iter().zip(x).map(|(w, v)| w * v).sum::<f64>();
        let p1 = 1.0 / (1.0 + (-z).exp());
        Ok([1.0 - p1, p1])
    }
}

fn renormalize([p0, p1]: [f64; 2]) -> Result<[f64; 2], ModelError> {
    if !p0.is_finite() || !p1.is_finite() {
        return Err(ModelError::NonFinite { stage: STAGE });
    }
    let (p0, p1) = (p0.clamp(0.0, 1.0), p1.clamp(0.0, 1.0));
    let total = p0 + p1;
    if total == 0.0 {
        return Err(ModelError::NonFinite { stage: STAGE });
    }
    Ok([p0 / total, p1 / total])
}
