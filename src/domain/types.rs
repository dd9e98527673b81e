//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and scoring
//! - written into the model artifact
//! - reloaded later for evaluation or single-observation prediction

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of measured features per observation.
pub const NUM_FEATURES: usize = 4;

/// Number of target classes.
pub const NUM_CLASSES: usize = 3;

/// Column names for the feature table, in measurement order.
///
/// These have no effect on fitting; they are carried for report and artifact
/// readability.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
];

/// Target class of an observation.
///
/// The discriminant order matches the class index used by the model's weight
/// rows and by the confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; NUM_CLASSES] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    /// Class index used for one-hot targets and weight rows.
    pub fn index(self) -> usize {
        match self {
            Species::Setosa => 0,
            Species::Versicolor => 1,
            Species::Virginica => 2,
        }
    }

    /// Inverse of [`Species::index`]. Returns `None` for out-of-range indices.
    pub fn from_index(idx: usize) -> Option<Species> {
        Species::ALL.get(idx).copied()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One labeled observation: four measurements plus the species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub features: [f64; NUM_FEATURES],
    pub species: Species,
}

/// A labeled feature table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Per-class row counts, indexed by [`Species::index`].
    pub fn class_counts(&self) -> [usize; NUM_CLASSES] {
        let mut counts = [0usize; NUM_CLASSES];
        for r in &self.records {
            counts[r.species.index()] += 1;
        }
        counts
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            n_rows: self.records.len(),
            class_counts: self.class_counts(),
        }
    }
}

/// Summary statistics shown in the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub class_counts: [usize; NUM_CLASSES],
}

/// Fully resolved configuration for a training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Seed for the train/evaluation shuffle.
    pub seed: u64,
    /// Fraction of rows held out for evaluation.
    pub test_fraction: f64,
    /// Iteration cap for the gradient-descent fit.
    pub max_iter: usize,
    /// Gradient-descent step size.
    pub learning_rate: f64,
    /// Stop early once the gradient max-norm falls below this.
    pub tolerance: f64,
    /// Where the model artifact is written.
    pub out_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_index_round_trips() {
        for s in Species::ALL {
            assert_eq!(Species::from_index(s.index()), Some(s));
        }
        assert_eq!(Species::from_index(NUM_CLASSES), None);
    }

    #[test]
    fn class_counts_track_records() {
        let data = Dataset {
            records: vec![
                Record { features: [1.0; NUM_FEATURES], species: Species::Setosa },
                Record { features: [2.0; NUM_FEATURES], species: Species::Virginica },
                Record { features: [3.0; NUM_FEATURES], species: Species::Virginica },
            ],
        };
        assert_eq!(data.class_counts(), [1, 0, 2]);
        assert_eq!(data.stats().n_rows, 3);
    }
}
