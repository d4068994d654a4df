//! Predictive model implementations.
//!
//! Models sit behind the `PredictiveModel` trait so the estimator can be driven by
//! a loaded artifact in production and by trivial doubles in tests.

pub mod model;

pub use model::*;
