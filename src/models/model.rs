//! Predictive models.
//!
//! The estimator only needs one primitive: given a `FeatureVector`, return a
//! scalar base estimate. Anything that can do that is a `PredictiveModel`.
//!
//! - `LinearModel`: the artifact-backed regression (optionally standardized)
//! - `ConstantModel`: a fixed base estimate (what-if runs and tests)

use nalgebra::DVector;
use thiserror::Error;

use crate::domain::{FEATURE_COUNT, FeatureVector};

/// Failure raised by a model during prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("shape mismatch: expected {expected} features, model has {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("model produced a non-finite value")]
    NonFinite,
    #[error("{0}")]
    Other(String),
}

/// A loaded, read-only model shared across estimation calls.
pub trait PredictiveModel: Send + Sync {
    /// Predict the raw base estimate for one feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Model name for logs and reports.
    fn name(&self) -> &str;
}

/// Per-feature standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub mean: DVector<f64>,
    pub scale: DVector<f64>,
}

impl StandardScaler {
    pub fn transform(&self, x: &DVector<f64>) -> DVector<f64> {
        (x - &self.mean).component_div(&self.scale)
    }
}

/// Linear regression `y = intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub name: String,
    pub intercept: f64,
    pub coefficients: DVector<f64>,
    pub scaler: Option<StandardScaler>,
}

impl PredictiveModel for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::ShapeMismatch {
                expected: FEATURE_COUNT,
                found: self.coefficients.len(),
            });
        }

        let x = DVector::from_row_slice(&features.to_array());
        let x = match &self.scaler {
            Some(scaler) => {
                if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
                    return Err(ModelError::ShapeMismatch {
                        expected: FEATURE_COUNT,
                        found: scaler.mean.len().min(scaler.scale.len()),
                    });
                }
                scaler.transform(&x)
            }
            None => x,
        };

        let y = self.intercept + self.coefficients.dot(&x);
        if !y.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(y)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Returns the same base estimate for every input.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantModel {
    pub value: f64,
}

impl ConstantModel {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl PredictiveModel for ConstantModel {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self.value)
    }

    fn name(&self) -> &str {
        "constant"
    }
}
