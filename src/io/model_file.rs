//! Read/write model artifact JSON files.
//!
//! The artifact is the "portable" representation of a training run:
//! - the fitted parameters (weights, intercepts, standardizer)
//! - run metadata (training date, seed, iteration cap, convergence, accuracy)
//! - feature and class names for downstream consumers
//!
//! Writing overwrites any existing artifact at the target path and creates
//! the containing directory if it is missing.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::LogisticModel;

/// Value of the artifact's `tool` field; checked on read.
pub const TOOL_NAME: &str = "iris-classify";

/// On-disk schema of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub trained_on: NaiveDate,
    pub seed: u64,
    pub max_iter: usize,
    pub converged: bool,
    pub train_rows: usize,
    pub eval_rows: usize,
    pub accuracy: f64,
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub model: LogisticModel,
}

/// Write a model artifact, creating the parent directory if needed.
pub fn write_model_json(path: &Path, artifact: &ModelFile) -> Result<(), AppError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| {
                AppError::usage(format!(
                    "Failed to create model directory '{}': {e}",
                    dir.display()
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create model file '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, artifact)
        .map_err(|e| AppError::usage(format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

/// Read a model artifact and validate its contents.
pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open model file '{}': {e}", path.display()))
    })?;
    let artifact: ModelFile = serde_json::from_reader(file)
        .map_err(|e| AppError::usage(format!("Invalid model JSON: {e}")))?;

    if artifact.tool != TOOL_NAME {
        return Err(AppError::data(format!(
            "Model file '{}' was written by '{}', expected '{TOOL_NAME}'.",
            path.display(),
            artifact.tool
        )));
    }
    artifact.model.validate()?;

    Ok(artifact)
}
