//! `price-estimator` library crate.
//!
//! The binary (`price-estimator`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the estimator can be driven by any `PredictiveModel` (artifact or test double)
//! - front-ends (CLI, batch) share one estimation path

pub mod adjust;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
