//! Seeded train/evaluation splitting.
//!
//! The split is a plain shuffled partition: no stratification, no
//! cross-validation. Reproducibility comes from seeding `StdRng` with the
//! configured seed, so the same seed always yields the same partition.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::Dataset;
use crate::error::AppError;

/// Disjoint training and evaluation subsets of one dataset.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Dataset,
    pub test: Dataset,
}

/// Partition `data` into training and evaluation subsets.
///
/// `test_fraction` of the rows (rounded to the nearest row, clamped so both
/// sides stay non-empty) are held out for evaluation. Row order within each
/// subset follows the shuffle, not the input order.
pub fn train_test_split(
    data: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit, AppError> {
    if data.len() < 2 {
        return Err(AppError::data("Need at least 2 rows to split."));
    }
    if !(test_fraction.is_finite() && test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(AppError::usage(format!(
            "Test fraction must be in (0, 1), got {test_fraction}."
        )));
    }

    let n = data.len();
    let n_test = ((n as f64) * test_fraction).round() as usize;
    let n_test = n_test.clamp(1, n - 1);

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    let subset = |idx: &[usize]| Dataset {
        records: idx.iter().map(|&i| data.records[i]).collect(),
    };

    Ok(TrainTestSplit {
        train: subset(train_idx),
        test: subset(test_idx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_iris;

    #[test]
    fn iris_split_is_120_30() {
        let data = load_iris();
        let split = train_test_split(&data, 0.2, 42).unwrap();
        assert_eq!(split.train.len(), 120);
        assert_eq!(split.test.len(), 30);
    }

    #[test]
    fn same_seed_gives_identical_partition() {
        let data = load_iris();
        let a = train_test_split(&data, 0.2, 42).unwrap();
        let b = train_test_split(&data, 0.2, 42).unwrap();
        assert_eq!(a.train.records, b.train.records);
        assert_eq!(a.test.records, b.test.records);
    }

    #[test]
    fn different_seeds_give_different_partitions() {
        let data = load_iris();
        let a = train_test_split(&data, 0.2, 42).unwrap();
        let b = train_test_split(&data, 0.2, 43).unwrap();
        assert_ne!(a.test.records, b.test.records);
    }

    #[test]
    fn subsets_are_disjoint_and_exhaustive() {
        let data = load_iris();
        let split = train_test_split(&data, 0.2, 7).unwrap();

        // Every input row appears exactly once across the two subsets. Rows
        // are compared by value; the iris table has duplicate rows, so count
        // occurrences rather than using a set.
        let mut all: Vec<_> = split
            .train
            .records
            .iter()
            .chain(split.test.records.iter())
            .map(|r| (r.features.map(f64::to_bits), r.species))
            .collect();
        let mut expected: Vec<_> = data
            .records
            .iter()
            .map(|r| (r.features.map(f64::to_bits), r.species))
            .collect();
        all.sort();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn rejects_degenerate_fractions() {
        let data = load_iris();
        assert!(train_test_split(&data, 0.0, 42).is_err());
        assert!(train_test_split(&data, 1.0, 42).is_err());
        assert!(train_test_split(&data, f64::NAN, 42).is_err());
    }
}
