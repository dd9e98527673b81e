//! Shared "train pipeline" logic used by the CLI front-end and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> split -> fit -> score
//!
//! The CLI can then focus on presentation (printing and artifact writing).

use crate::data::{load_iris, train_test_split, TrainTestSplit};
use crate::domain::{DatasetStats, Species, TrainConfig, FEATURE_NAMES};
use crate::error::AppError;
use crate::fit::{fit_logistic, FitOptions, FitOutcome};
use crate::io::{ModelFile, TOOL_NAME};
use crate::report::{evaluate, Evaluation};

/// All computed outputs of a single training run.
#[derive(Debug, Clone)]
pub struct TrainOutput {
    pub stats: DatasetStats,
    pub split: TrainTestSplit,
    pub outcome: FitOutcome,
    pub evaluation: Evaluation,
}

/// Execute the full training pipeline and return the computed outputs.
pub fn run_train(config: &TrainConfig) -> Result<TrainOutput, AppError> {
    // 1) Load the bundled dataset.
    let data = load_iris();
    let stats = data.stats();

    // 2) Seeded train/evaluation split.
    let split = train_test_split(&data, config.test_fraction, config.seed)?;

    // 3) Fit the classifier on the training rows.
    let opts = FitOptions {
        max_iter: config.max_iter,
        learning_rate: config.learning_rate,
        tolerance: config.tolerance,
    };
    let outcome = fit_logistic(&split.train, &opts)?;

    // 4) Score on the held-out rows.
    let evaluation = evaluate(&outcome.model, &split.test)?;

    Ok(TrainOutput {
        stats,
        split,
        outcome,
        evaluation,
    })
}

/// Assemble the on-disk artifact for a finished run.
pub fn build_artifact(config: &TrainConfig, output: &TrainOutput) -> ModelFile {
    ModelFile {
        tool: TOOL_NAME.to_string(),
        trained_on: chrono::Local::now().date_naive(),
        seed: config.seed,
        max_iter: config.max_iter,
        converged: output.outcome.converged,
        train_rows: output.split.train.len(),
        eval_rows: output.split.test.len(),
        accuracy: output.evaluation.accuracy,
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        classes: Species::ALL.iter().map(|s| s.display_name().to_string()).collect(),
        model: output.outcome.model.clone(),
    }
}
