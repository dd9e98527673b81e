//! Dataset loading and splitting.

pub mod iris;
pub mod split;

pub use iris::load_iris;
pub use split::{train_test_split, TrainTestSplit};
