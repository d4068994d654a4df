//! The price estimation pipeline.
//!
//! validate inputs -> model base estimate -> scale -> per-feature adjustments
//!
//! Both the single-shot CLI path and batch mode go through `estimate`, so the
//! front-ends only deal with presentation.

use crate::adjust::{RULES, apply_rules};
use crate::domain::{Estimate, FeatureVector};
use crate::error::EstimationError;
use crate::models::PredictiveModel;

pub mod batch;

/// Converts the model's base estimate to currency units.
pub const BASE_PRICE_SCALE: f64 = 10_000.0;

/// Estimate the adjusted price for one feature vector.
///
/// Fails without a partial result if any feature is non-finite, the model
/// errors, or the computation leaves the finite range.
pub fn estimate(features: &FeatureVector, model: &dyn PredictiveModel) -> Result<Estimate, EstimationError> {
    if let Some((feature, value)) = features.first_non_finite() {
        return Err(EstimationError::NonFiniteFeature { feature, value });
    }

    let base_estimate = model.predict(features)?;
    if !base_estimate.is_finite() {
        return Err(EstimationError::NonFinitePrice { stage: "base estimate" });
    }

    let base_price = base_estimate * BASE_PRICE_SCALE;
    let (adjusted_price, adjustments) = apply_rules(base_price, features, RULES.iter());
    if !(base_price.is_finite() && adjusted_price.is_finite()) {
        return Err(EstimationError::NonFinitePrice { stage: "adjusted price" });
    }

    tracing::debug!(
        model = model.name(),
        base_estimate,
        base_price,
        adjusted_price,
        "estimate complete"
    );

    Ok(Estimate {
        base_estimate,
        base_price,
        adjustments,
        adjusted_price,
    })
}
