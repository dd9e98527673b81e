//! Fitted model representation and prediction.

mod model;

pub use model::{LogisticModel, Standardizer};
