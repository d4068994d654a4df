//! Domain types used throughout the estimator.
//!
//! This module defines:
//!
//! - the feature set (`Feature`, `FeatureVector`)
//! - estimation outputs (`Estimate`, `Adjustment`)
//! - resolved run settings (`EstimatorConfig`)

pub mod types;

pub use types::*;
