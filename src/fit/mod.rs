//! Model fitting.

mod logistic;

pub use logistic::{fit_logistic, FitOptions, FitOutcome};
