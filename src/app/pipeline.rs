//! Shared setup and batch workflow used by the CLI commands.
//!
//! resolve config -> load model once -> estimate (single or batch) -> export
//!
//! The command handlers in `app` then only deal with presentation.

use std::path::{Path, PathBuf};

use crate::cli::ModelArgs;
use crate::domain::EstimatorConfig;
use crate::error::AppError;
use crate::estimate::batch::{BatchOutcome, BatchStats, estimate_batch};
use crate::io::ingest::{IngestedRows, load_feature_rows};
use crate::models::{ConstantModel, PredictiveModel};

/// Environment variable naming the model artifact.
pub const MODEL_PATH_ENV: &str = "PRICE_ESTIMATOR_MODEL";

/// Artifact used when neither `--model` nor the environment names one.
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// All computed outputs of a `batch` run.
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub ingest: IngestedRows,
    pub outcomes: Vec<BatchOutcome>,
}

/// Resolve settings: CLI flag, then `.env`/process environment, then the default.
pub fn resolve_config(args: &ModelArgs) -> EstimatorConfig {
    dotenvy::dotenv().ok();
    let env_path = std::env::var(MODEL_PATH_ENV).ok().filter(|s| !s.trim().is_empty());
    config_from(args, env_path)
}

fn config_from(args: &ModelArgs, env_path: Option<String>) -> EstimatorConfig {
    let model_path = args
        .model
        .clone()
        .or_else(|| env_path.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
    EstimatorConfig {
        model_path,
        base_estimate: args.base_estimate,
    }
}

/// Load the predictor once for the whole process. Failure is fatal (exit code 2).
pub fn load_predictor(config: &EstimatorConfig) -> Result<Box<dyn PredictiveModel>, AppError> {
    if let Some(value) = config.base_estimate {
        if !value.is_finite() {
            return Err(AppError::new(2, "--base-estimate must be a finite number."));
        }
        tracing::info!(value, "using constant base estimate; model artifact not loaded");
        return Ok(Box::new(ConstantModel::new(value)));
    }
    let model = crate::io::artifact::load_model(&config.model_path)?;
    Ok(Box::new(model))
}

/// Ingest a feature CSV and estimate every valid row.
pub fn run_batch(input: &Path, model: &dyn PredictiveModel) -> Result<BatchRun, AppError> {
    let ingest = load_feature_rows(input)?;
    if ingest.rows.is_empty() {
        let summary = crate::report::format_batch_summary(BatchStats::default(), &ingest.row_errors);
        return Err(AppError::new(
            2,
            format!("No valid rows to estimate.\n{}", summary.trim_end()),
        ));
    }
    let outcomes = estimate_batch(&ingest.rows, model);
    Ok(BatchRun { ingest, outcomes })
}
