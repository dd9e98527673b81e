//! Multinomial logistic regression model.
//!
//! Prediction relies on two primitive operations:
//! - compute per-class scores (logits) for one observation
//! - turn scores into probabilities or an argmax class
//!
//! Parameters are kept as plain `Vec<f64>` so the model serializes directly
//! into the JSON artifact.

use serde::{Deserialize, Serialize};

use crate::domain::{Species, NUM_CLASSES, NUM_FEATURES};
use crate::error::AppError;
use crate::math::softmax_in_place;

/// Per-feature standardization estimated on the training subset.
///
/// Applied to every observation before the linear scores are computed, at
/// training and prediction time alike, so it is persisted with the weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Standardizer {
    pub fn transform(&self, features: &[f64; NUM_FEATURES]) -> [f64; NUM_FEATURES] {
        let mut out = [0.0; NUM_FEATURES];
        for j in 0..NUM_FEATURES {
            out[j] = (features[j] - self.mean[j]) / self.std[j];
        }
        out
    }
}

/// A fitted multinomial (softmax) linear classifier.
///
/// `weights[c]` holds the per-feature coefficients for class `c` (indexed by
/// [`Species::index`]); `intercepts[c]` is the corresponding bias term.
/// Immutable after fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    pub scaler: Standardizer,
}

impl LogisticModel {
    /// Per-class linear scores (logits) for one observation.
    pub fn decision_function(&self, features: &[f64; NUM_FEATURES]) -> [f64; NUM_CLASSES] {
        let x = self.scaler.transform(features);
        let mut scores = [0.0; NUM_CLASSES];
        for c in 0..NUM_CLASSES {
            let w = &self.weights[c];
            let mut s = self.intercepts[c];
            for j in 0..NUM_FEATURES {
                s += w[j] * x[j];
            }
            scores[c] = s;
        }
        scores
    }

    /// Class probabilities for one observation.
    pub fn predict_proba(&self, features: &[f64; NUM_FEATURES]) -> [f64; NUM_CLASSES] {
        let mut scores = self.decision_function(features);
        softmax_in_place(&mut scores);
        scores
    }

    /// Most likely class for one observation.
    pub fn predict(&self, features: &[f64; NUM_FEATURES]) -> Species {
        let scores = self.decision_function(features);
        let mut best = 0;
        for c in 1..NUM_CLASSES {
            if scores[c] > scores[best] {
                best = c;
            }
        }
        // `best` is always < NUM_CLASSES.
        Species::from_index(best).unwrap_or(Species::Setosa)
    }

    /// Reject models whose parameter shapes or values cannot have come from
    /// a successful fit. Used when reloading an artifact.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.weights.len() != NUM_CLASSES || self.intercepts.len() != NUM_CLASSES {
            return Err(AppError::data("Model artifact has the wrong class count."));
        }
        if self.weights.iter().any(|w| w.len() != NUM_FEATURES) {
            return Err(AppError::data("Model artifact has the wrong feature count."));
        }
        if self.scaler.mean.len() != NUM_FEATURES || self.scaler.std.len() != NUM_FEATURES {
            return Err(AppError::data("Model artifact has a malformed standardizer."));
        }
        let finite = self
            .weights
            .iter()
            .flatten()
            .chain(self.intercepts.iter())
            .chain(self.scaler.mean.iter())
            .chain(self.scaler.std.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(AppError::numeric("Model artifact contains non-finite parameters."));
        }
        if self.scaler.std.iter().any(|s| *s <= 0.0) {
            return Err(AppError::numeric("Model artifact has non-positive feature scales."));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_model() -> LogisticModel {
        // Scores depend only on the first feature: class 2 wins for large
        // values, class 0 for small ones.
        LogisticModel {
            weights: vec![
                vec![-1.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0, 0.0],
            ],
            intercepts: vec![0.0, 0.0, 0.0],
            scaler: Standardizer {
                mean: vec![0.0; NUM_FEATURES],
                std: vec![1.0; NUM_FEATURES],
            },
        }
    }

    #[test]
    fn predict_is_argmax_of_proba() {
        let model = toy_model();
        for x in [[-2.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0], [3.0, 0.0, 0.0, 0.0]] {
            let proba = model.predict_proba(&x);
            let argmax = proba
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(model.predict(&x).index(), argmax);
        }
    }

    #[test]
    fn proba_sums_to_one() {
        let model = toy_model();
        let proba = model.predict_proba(&[1.5, 0.0, 0.0, 0.0]);
        let sum: f64 = proba.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12, "probabilities sum: {sum}");
    }

    #[test]
    fn standardizer_is_applied_before_scoring() {
        let mut model = toy_model();
        model.scaler.mean = vec![10.0, 0.0, 0.0, 0.0];
        // Raw 10.0 standardizes to 0.0, so all scores tie and argmax is class 0.
        assert_eq!(model.predict(&[10.0, 0.0, 0.0, 0.0]), Species::Setosa);
        // Raw 12.0 standardizes to 2.0, so class 2 wins.
        assert_eq!(model.predict(&[12.0, 0.0, 0.0, 0.0]), Species::Virginica);
    }

    #[test]
    fn validate_rejects_malformed_artifacts() {
        let mut model = toy_model();
        assert!(model.validate().is_ok());

        model.intercepts[1] = f64::NAN;
        assert!(model.validate().is_err());

        let mut short = toy_model();
        short.weights.pop();
        assert!(short.validate().is_err());

        let mut flat = toy_model();
        flat.scaler.std[0] = 0.0;
        assert!(flat.validate().is_err());
    }
}
