//! Command-line parsing for the Iris classifier trainer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Where the model artifact goes unless `--out`/`--model` says otherwise.
pub const DEFAULT_MODEL_PATH: &str = "model/iris_model.json";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "iris", version, about = "Iris species classifier (multinomial logistic regression)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the bundled dataset, split, fit, report accuracy, and save the model.
    ///
    /// Running `iris` with no arguments is equivalent to `iris train` with all
    /// defaults.
    Train(TrainArgs),
    /// Reload a saved model and re-score it on the held-out split.
    Eval(EvalArgs),
    /// Reload a saved model and classify one observation.
    Predict(PredictArgs),
}

/// Options for a training run.
#[derive(Debug, Parser, Clone)]
pub struct TrainArgs {
    /// Random seed for the train/evaluation split.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of rows held out for evaluation.
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Iteration cap for the gradient-descent fit.
    #[arg(long, default_value_t = 200)]
    pub max_iter: usize,

    /// Gradient-descent step size.
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Stop early once the gradient max-norm falls below this.
    #[arg(long, default_value_t = 1e-5)]
    pub tolerance: f64,

    /// Where to write the model artifact.
    #[arg(short = 'o', long, default_value = DEFAULT_MODEL_PATH)]
    pub out: PathBuf,
}

/// Options for re-scoring a saved model.
#[derive(Debug, Parser, Clone)]
pub struct EvalArgs {
    /// Path of the model artifact to load.
    #[arg(short = 'm', long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Seed used to rebuild the evaluation split (match the training seed).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of rows held out for evaluation (match the training run).
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,
}

/// Options for classifying one observation.
#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    /// Path of the model artifact to load.
    #[arg(short = 'm', long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Sepal length (cm).
    pub sepal_length: f64,
    /// Sepal width (cm).
    pub sepal_width: f64,
    /// Petal length (cm).
    pub petal_length: f64,
    /// Petal width (cm).
    pub petal_width: f64,
}
