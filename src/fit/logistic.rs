//! Multinomial logistic regression fitting.
//!
//! Given labeled rows we minimize the mean softmax cross-entropy with
//! full-batch gradient descent:
//!
//! ```text
//! minimize  -(1/n) Σ_i ln p(y_i | x_i; W, b)
//! ```
//!
//! Implementation choices:
//! - Parameters start at zero, so the fit is deterministic: same training
//!   rows in, same parameters out. All run-to-run variation lives in the
//!   split seed.
//! - Features are standardized with training-set statistics before fitting;
//!   plain gradient descent on raw centimetre scales converges too slowly
//!   within the iteration cap. The standardizer becomes part of the model.
//! - Hitting the iteration cap without reaching the gradient tolerance is
//!   reported via `FitOutcome::converged`, not as an error. The parameters at
//!   the cap are still a usable fit.

use nalgebra::DMatrix;

use crate::domain::{Dataset, NUM_CLASSES, NUM_FEATURES};
use crate::error::AppError;
use crate::math::log_sum_exp;
use crate::models::{LogisticModel, Standardizer};

/// Options controlling the gradient-descent fit.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Hard cap on gradient steps.
    pub max_iter: usize,
    /// Step size.
    pub learning_rate: f64,
    /// Stop once the gradient max-norm falls below this.
    pub tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iter: 200,
            learning_rate: 0.1,
            tolerance: 1e-5,
        }
    }
}

/// Result of a fit: the model plus convergence diagnostics for the report.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub model: LogisticModel,
    /// Gradient steps actually taken.
    pub iterations: usize,
    /// Whether the gradient tolerance was reached before the cap.
    pub converged: bool,
    /// Gradient max-norm at the last step.
    pub grad_norm: f64,
    /// Mean cross-entropy on the training rows at the last step.
    pub loss: f64,
}

/// Fit a multinomial logistic regression on `train`.
pub fn fit_logistic(train: &Dataset, opts: &FitOptions) -> Result<FitOutcome, AppError> {
    if train.is_empty() {
        return Err(AppError::data("No training rows to fit."));
    }
    if opts.max_iter == 0 {
        return Err(AppError::usage("Iteration cap must be > 0."));
    }
    if !(opts.learning_rate.is_finite() && opts.learning_rate > 0.0) {
        return Err(AppError::usage(format!(
            "Learning rate must be positive, got {}.",
            opts.learning_rate
        )));
    }
    if !(opts.tolerance.is_finite() && opts.tolerance >= 0.0) {
        return Err(AppError::usage(format!(
            "Tolerance must be non-negative, got {}.",
            opts.tolerance
        )));
    }

    let n = train.len();
    let scaler = estimate_scaler(train)?;

    // Standardized design matrix, one row per observation.
    let x = DMatrix::from_fn(n, NUM_FEATURES, |i, j| {
        let f = &train.records[i].features;
        (f[j] - scaler.mean[j]) / scaler.std[j]
    });
    let labels: Vec<usize> = train.records.iter().map(|r| r.species.index()).collect();

    let mut w = DMatrix::<f64>::zeros(NUM_CLASSES, NUM_FEATURES);
    let mut b = [0.0_f64; NUM_CLASSES];

    let mut iterations = 0;
    let mut converged = false;
    let mut grad_norm = f64::INFINITY;
    let mut loss = f64::INFINITY;

    for _ in 0..opts.max_iter {
        // Scores: n x C, then per-row loss and probabilities.
        let mut p = &x * w.transpose();
        loss = 0.0;
        for i in 0..n {
            let mut scores = [0.0_f64; NUM_CLASSES];
            for c in 0..NUM_CLASSES {
                scores[c] = p[(i, c)] + b[c];
            }
            let lse = log_sum_exp(&scores);
            loss += lse - scores[labels[i]];
            for c in 0..NUM_CLASSES {
                p[(i, c)] = (scores[c] - lse).exp();
            }
        }
        loss /= n as f64;
        if !loss.is_finite() {
            return Err(AppError::numeric("Non-finite loss during fitting."));
        }

        // Residuals P - Y, then the mean gradient.
        for (i, &label) in labels.iter().enumerate() {
            p[(i, label)] -= 1.0;
        }
        let grad_w = p.transpose() * &x / (n as f64);
        let mut grad_b = [0.0_f64; NUM_CLASSES];
        for c in 0..NUM_CLASSES {
            grad_b[c] = p.column(c).sum() / (n as f64);
        }

        grad_norm = grad_w
            .iter()
            .chain(grad_b.iter())
            .fold(0.0_f64, |m, g| m.max(g.abs()));
        if !grad_norm.is_finite() {
            return Err(AppError::numeric("Non-finite gradient during fitting."));
        }

        iterations += 1;
        if grad_norm < opts.tolerance {
            converged = true;
            break;
        }

        w -= opts.learning_rate * &grad_w;
        for c in 0..NUM_CLASSES {
            b[c] -= opts.learning_rate * grad_b[c];
        }
    }

    let model = LogisticModel {
        weights: (0..NUM_CLASSES)
            .map(|c| w.row(c).iter().copied().collect())
            .collect(),
        intercepts: b.to_vec(),
        scaler,
    };

    Ok(FitOutcome {
        model,
        iterations,
        converged,
        grad_norm,
        loss,
    })
}

/// Per-feature mean and standard deviation of the training rows.
fn estimate_scaler(train: &Dataset) -> Result<Standardizer, AppError> {
    let n = train.len() as f64;
    let mut mean = vec![0.0; NUM_FEATURES];
    for r in &train.records {
        for j in 0..NUM_FEATURES {
            mean[j] += r.features[j];
        }
    }
    for m in mean.iter_mut() {
        *m /= n;
    }

    let mut std = vec![0.0; NUM_FEATURES];
    for r in &train.records {
        for j in 0..NUM_FEATURES {
            let d = r.features[j] - mean[j];
            std[j] += d * d;
        }
    }
    for (j, s) in std.iter_mut().enumerate() {
        *s = (*s / n).sqrt();
        if !s.is_finite() {
            return Err(AppError::numeric("Non-finite feature statistics."));
        }
        if *s <= 1e-12 {
            return Err(AppError::data(format!(
                "Feature {j} is constant on the training rows; cannot standardize."
            )));
        }
    }

    Ok(Standardizer { mean, std })
}
