//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the train pipeline (load -> split -> fit -> score)
//! - prints the run summary
//! - writes/reloads the model artifact

use clap::Parser;

use crate::cli::{Command, EvalArgs, PredictArgs, TrainArgs};
use crate::domain::{Species, TrainConfig, FEATURE_NAMES};
use crate::error::AppError;
use crate::io::{read_model_json, write_model_json};

pub mod pipeline;

/// Entry point for the `iris` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `iris` (and `iris --seed 7`) to behave like `iris train ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // keeping the zero-argument invocation working.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Train(args) => handle_train(args),
        Command::Eval(args) => handle_eval(args),
        Command::Predict(args) => handle_predict(args),
    }
}

fn handle_train(args: TrainArgs) -> Result<(), AppError> {
    let config = train_config_from_args(&args);
    let output = pipeline::run_train(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(
            &output.stats,
            output.split.train.len(),
            output.split.test.len(),
            &output.outcome,
            &output.evaluation,
            &config,
        )
    );

    if !output.outcome.converged {
        eprintln!(
            "warning: fit did not reach tolerance {} within {} iterations (gradient max-norm {:.3e})",
            config.tolerance, config.max_iter, output.outcome.grad_norm
        );
    }

    let artifact = pipeline::build_artifact(&config, &output);
    println!("Saving model to '{}'", config.out_path.display());
    write_model_json(&config.out_path, &artifact)?;
    println!("Model saved.");

    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let artifact = read_model_json(&args.model)?;

    let data = crate::data::load_iris();
    let split = crate::data::train_test_split(&data, args.test_fraction, args.seed)?;
    let eval = crate::report::evaluate(&artifact.model, &split.test)?;

    println!(
        "Model '{}' (trained {}, seed {})",
        args.model.display(),
        artifact.trained_on,
        artifact.seed
    );
    println!(
        "Accuracy on the seed-{} evaluation split: {:.4} ({}/{} rows)",
        args.seed,
        eval.accuracy,
        eval.confusion.correct(),
        eval.n_rows
    );
    if args.seed != artifact.seed {
        println!(
            "note: split seed {} differs from the training seed {}; rows the model trained on may appear in this evaluation set",
            args.seed, artifact.seed
        );
    }
    print!("{}", crate::report::format_confusion_matrix(&eval));

    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let artifact = read_model_json(&args.model)?;

    let features = [
        args.sepal_length,
        args.sepal_width,
        args.petal_length,
        args.petal_width,
    ];
    if features.iter().any(|v| !v.is_finite()) {
        return Err(AppError::usage("Measurements must be finite numbers."));
    }

    let proba = artifact.model.predict_proba(&features);
    let species = artifact.model.predict(&features);

    for (name, value) in FEATURE_NAMES.iter().zip(features.iter()) {
        println!("{name}: {value}");
    }
    println!("Predicted species: {species}");
    for (c, s) in Species::ALL.iter().enumerate() {
        println!("  p({s}) = {:.4}", proba[c]);
    }

    Ok(())
}

pub fn train_config_from_args(args: &TrainArgs) -> TrainConfig {
    TrainConfig {
        seed: args.seed,
        test_fraction: args.test_fraction,
        max_iter: args.max_iter,
        learning_rate: args.learning_rate,
        tolerance: args.tolerance,
        out_path: args.out.clone(),
    }
}

/// Rewrite argv so `iris` defaults to `iris train`.
///
/// Rules:
/// - `iris`                     -> `iris train`
/// - `iris --seed 7 ...`        -> `iris train --seed 7 ...`
/// - `iris --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("train".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "train" | "eval" | "predict");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "train flags".
    if arg1.starts_with('-') {
        argv.insert(1, "train".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
