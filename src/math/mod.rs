//! Numeric primitives shared by fitting and prediction.

mod softmax;

pub use softmax::{log_sum_exp, softmax_in_place};
