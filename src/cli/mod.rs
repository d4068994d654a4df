//! Command-line parsing for the price estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::FeatureVector;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "price-estimator", version, about = "Real Estate Price Predictor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the adjusted price for one property (default command).
    Estimate(EstimateArgs),
    /// Estimate every row of a feature CSV.
    Batch(BatchArgs),
    /// Print the adjustment rule table.
    Rules(RulesArgs),
}

/// Where the base estimate comes from.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Model artifact JSON (defaults to $PRICE_ESTIMATOR_MODEL, then `model.json`).
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Skip the artifact and use this base estimate for every input.
    #[arg(long, allow_negative_numbers = true)]
    pub base_estimate: Option<f64>,
}

/// The thirteen feature inputs. Each defaults to 0.
#[derive(Debug, Args, Clone)]
pub struct FeatureArgs {
    /// CRIM - per capita crime rate by town.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub crim: f64,

    /// ZN - proportion of residential land zoned for lots over 25,000 sq.ft.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub zn: f64,

    /// INDUS - proportion of non-retail business acres per town.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub indus: f64,

    /// CHAS - Charles River dummy variable (1 if tract bounds river).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub chas: f64,

    /// NOX - nitric oxides concentration (parts per 10 million).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub nox: f64,

    /// RM - average number of rooms per dwelling.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rm: f64,

    /// AGE - proportion of owner-occupied units built prior to 1940.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub age: f64,

    /// DIS - weighted distances to five Boston employment centres.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub dis: f64,

    /// RAD - index of accessibility to radial highways.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rad: f64,

    /// TAX - full-value property-tax rate per $10,000.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub tax: f64,

    /// PTRATIO - pupil-teacher ratio by town.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub ptratio: f64,

    /// B - 1000(Bk - 0.63)^2 (model input only; never adjusted).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub b: f64,

    /// LSTAT - % lower status of the population.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub lstat: f64,
}

impl FeatureArgs {
    pub fn to_features(&self) -> FeatureVector {
        FeatureVector {
            crim: self.crim,
            zn: self.zn,
            indus: self.indus,
            chas: self.chas,
            nox: self.nox,
            rm: self.rm,
            age: self.age,
            dis: self.dis,
            rad: self.rad,
            tax: self.tax,
            ptratio: self.ptratio,
            b: self.b,
            lstat: self.lstat,
        }
    }
}

/// Options for a single estimate.
#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub features: FeatureArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Print the base price and every applied multiplier.
    #[arg(long)]
    pub breakdown: bool,

    /// Print the estimate as JSON.
    #[arg(long, conflicts_with = "breakdown")]
    pub json: bool,
}

/// Options for batch estimation.
#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Feature CSV (header must include all thirteen feature columns; `id` optional).
    #[arg(long, value_name = "CSV")]
    pub input: PathBuf,

    /// Write per-row results to CSV.
    #[arg(long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Options for printing the rule table.
#[derive(Debug, Args, Clone)]
pub struct RulesArgs {
    /// Print the rules as JSON.
    #[arg(long)]
    pub json: bool,
}
