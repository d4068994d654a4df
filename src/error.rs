use thiserror::Error;

use crate::domain::Feature;
use crate::models::ModelError;

/// Process-level error carrying the exit code for `main`.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// A single estimation failed. Never fatal to the process; the caller may retry
/// with different inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    #[error("{feature} must be a finite number (got {value})")]
    NonFiniteFeature { feature: Feature, value: f64 },
    #[error("model prediction failed: {0}")]
    Model(#[from] ModelError),
    #[error("non-finite {stage} produced")]
    NonFinitePrice { stage: &'static str },
}
