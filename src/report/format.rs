//! Formatted terminal output for training runs.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{DatasetStats, Species, TrainConfig, FEATURE_NAMES, NUM_CLASSES};
use crate::fit::FitOutcome;
use crate::report::Evaluation;

/// Format the full run summary (dataset, split, fit diagnostics, accuracy).
pub fn format_run_summary(
    stats: &DatasetStats,
    n_train: usize,
    n_test: usize,
    outcome: &FitOutcome,
    eval: &Evaluation,
    config: &TrainConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== iris - multinomial logistic regression ===\n");
    out.push_str(&format!(
        "Dataset: n={} | classes: {}\n",
        stats.n_rows,
        Species::ALL
            .iter()
            .enumerate()
            .map(|(c, s)| format!("{s}={}", stats.class_counts[c]))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    out.push_str(&format!("Features: {}\n", FEATURE_NAMES.join(", ")));
    out.push_str(&format!(
        "Split: train={n_train} | eval={n_test} | seed={}\n",
        config.seed
    ));

    out.push_str("\nFit diagnostics:\n");
    out.push_str(&format!(
        "- iterations: {}/{} ({})\n",
        outcome.iterations,
        config.max_iter,
        if outcome.converged { "converged" } else { "hit iteration cap" }
    ));
    out.push_str(&format!("- learning rate: {}\n", config.learning_rate));
    out.push_str(&format!("- final cross-entropy: {:.6}\n", outcome.loss));
    out.push_str(&format!("- final gradient max-norm: {:.3e}\n", outcome.grad_norm));

    out.push_str(&format!(
        "\nModel accuracy: {:.4} ({}/{} held-out rows)\n",
        eval.accuracy,
        eval.confusion.correct(),
        eval.n_rows
    ));
    out.push_str(&format_confusion_matrix(eval));

    out
}

/// Format the confusion matrix with actual classes as rows.
pub fn format_confusion_matrix(eval: &Evaluation) -> String {
    let mut out = String::new();
    out.push_str("\nConfusion matrix (rows = actual, cols = predicted):\n");

    let width = Species::ALL
        .iter()
        .map(|s| s.display_name().len())
        .max()
        .unwrap_or(0);

    out.push_str(&format!("{:>width$}", ""));
    for s in Species::ALL {
        out.push_str(&format!(" {:>width$}", s.display_name()));
    }
    out.push('\n');

    for (c, s) in Species::ALL.iter().enumerate() {
        out.push_str(&format!("{:>width$}", s.display_name()));
        for p in 0..NUM_CLASSES {
            out.push_str(&format!(" {:>width$}", eval.confusion.counts[c][p]));
        }
        out.push('\n');
    }

    out
}
