//! Shared domain types.

mod types;

pub use types::{
    Dataset, DatasetStats, Record, Species, TrainConfig, FEATURE_NAMES, NUM_CLASSES, NUM_FEATURES,
};
