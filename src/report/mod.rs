//! Evaluation metrics and formatted terminal output.

mod format;

pub use format::{format_confusion_matrix, format_run_summary};

use crate::domain::{Dataset, Species, NUM_CLASSES};
use crate::error::AppError;
use crate::models::LogisticModel;

/// Row-per-actual, column-per-predicted class counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub counts: [[usize; NUM_CLASSES]; NUM_CLASSES],
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        (0..NUM_CLASSES).map(|c| self.counts[c][c]).sum()
    }
}

/// Accuracy plus the confusion matrix behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub n_rows: usize,
}

/// Score `model` on every row of `data`.
pub fn evaluate(model: &LogisticModel, data: &Dataset) -> Result<Evaluation, AppError> {
    if data.is_empty() {
        return Err(AppError::data("No rows to evaluate."));
    }

    let mut counts = [[0usize; NUM_CLASSES]; NUM_CLASSES];
    for r in &data.records {
        let scores = model.decision_function(&r.features);
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(AppError::numeric("Non-finite model score during evaluation."));
        }
        let predicted = model.predict(&r.features);
        counts[r.species.index()][predicted.index()] += 1;
    }

    let confusion = ConfusionMatrix { counts };
    let accuracy = confusion.correct() as f64 / data.len() as f64;

    Ok(Evaluation {
        accuracy,
        confusion,
        n_rows: data.len(),
    })
}

/// Predicted species for every row, in row order.
pub fn predictions(model: &LogisticModel, data: &Dataset) -> Vec<Species> {
    data.records.iter().map(|r| model.predict(&r.features)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Record, NUM_FEATURES};
    use crate::models::Standardizer;

    /// A model that always predicts versicolor.
    fn constant_model() -> LogisticModel {
        LogisticModel {
            weights: vec![vec![0.0; NUM_FEATURES]; NUM_CLASSES],
            intercepts: vec![0.0, 1.0, 0.0],
            scaler: Standardizer {
                mean: vec![0.0; NUM_FEATURES],
                std: vec![1.0; NUM_FEATURES],
            },
        }
    }

    fn one_of_each() -> Dataset {
        Dataset {
            records: Species::ALL
                .iter()
                .map(|&species| Record { features: [1.0; NUM_FEATURES], species })
                .collect(),
        }
    }

    #[test]
    fn accuracy_counts_matches_on_the_diagonal() {
        let eval = evaluate(&constant_model(), &one_of_each()).unwrap();
        // One of three rows actually is versicolor.
        assert!((eval.accuracy - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(eval.confusion.total(), 3);
        assert_eq!(eval.confusion.correct(), 1);
        // Every prediction landed in the versicolor column.
        for row in eval.confusion.counts {
            assert_eq!(row[Species::Versicolor.index()], row.iter().sum::<usize>());
        }
    }

    #[test]
    fn accuracy_is_bounded() {
        let eval = evaluate(&constant_model(), &one_of_each()).unwrap();
        assert!((0.0..=1.0).contains(&eval.accuracy));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(evaluate(&constant_model(), &Dataset { records: vec![] }).is_err());
    }

    #[test]
    fn predictions_follow_row_order() {
        let preds = predictions(&constant_model(), &one_of_each());
        assert_eq!(preds, vec![Species::Versicolor; 3]);
    }
}
