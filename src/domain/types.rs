//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - filled from CLI flags or CSV rows
//! - handed to any `PredictiveModel`
//! - exported to JSON/CSV alongside the computed price

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of input features (fixed by the model contract).
pub const FEATURE_COUNT: usize = 13;

/// One of the thirteen housing features, in model column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Feature {
    Crim,
    Zn,
    Indus,
    Chas,
    Nox,
    Rm,
    Age,
    Dis,
    Rad,
    Tax,
    Ptratio,
    B,
    Lstat,
}

impl Feature {
    /// All features in model column order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Crim,
        Feature::Zn,
        Feature::Indus,
        Feature::Chas,
        Feature::Nox,
        Feature::Rm,
        Feature::Age,
        Feature::Dis,
        Feature::Rad,
        Feature::Tax,
        Feature::Ptratio,
        Feature::B,
        Feature::Lstat,
    ];

    /// Column name as used in model artifacts and CSV headers.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Crim => "CRIM",
            Feature::Zn => "ZN",
            Feature::Indus => "INDUS",
            Feature::Chas => "CHAS",
            Feature::Nox => "NOX",
            Feature::Rm => "RM",
            Feature::Age => "AGE",
            Feature::Dis => "DIS",
            Feature::Rad => "RAD",
            Feature::Tax => "TAX",
            Feature::Ptratio => "PTRATIO",
            Feature::B => "B",
            Feature::Lstat => "LSTAT",
        }
    }

    /// Human-readable label for terminal output.
    pub fn description(self) -> &'static str {
        match self {
            Feature::Crim => "per capita crime rate by town",
            Feature::Zn => "proportion of residential land zoned for lots over 25,000 sq.ft.",
            Feature::Indus => "proportion of non-retail business acres per town",
            Feature::Chas => "Charles River dummy variable",
            Feature::Nox => "nitric oxides concentration (parts per 10 million)",
            Feature::Rm => "average number of rooms per dwelling",
            Feature::Age => "proportion of owner-occupied units built prior to 1940",
            Feature::Dis => "weighted distances to five Boston employment centres",
            Feature::Rad => "index of accessibility to radial highways",
            Feature::Tax => "full-value property-tax rate per $10,000",
            Feature::Ptratio => "pupil-teacher ratio by town",
            Feature::B => "1000(Bk - 0.63)^2 where Bk is the proportion of blacks by town",
            Feature::Lstat => "% lower status of the population",
        }
    }

    /// Column index in the model's feature order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Case-insensitive lookup by column name.
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The thirteen model inputs. Every field defaults to `0.0`; no range is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", default)]
pub struct FeatureVector {
    pub crim: f64,
    pub zn: f64,
    pub indus: f64,
    pub chas: f64,
    pub nox: f64,
    pub rm: f64,
    pub age: f64,
    pub dis: f64,
    pub rad: f64,
    pub tax: f64,
    pub ptratio: f64,
    pub b: f64,
    pub lstat: f64,
}

impl FeatureVector {
    /// Build from values in model column order.
    pub fn from_array(v: [f64; FEATURE_COUNT]) -> Self {
        let [crim, zn, indus, chas, nox, rm, age, dis, rad, tax, ptratio, b, lstat] = v;
        Self {
            crim,
            zn,
            indus,
            chas,
            nox,
            rm,
            age,
            dis,
            rad,
            tax,
            ptratio,
            b,
            lstat,
        }
    }

    /// Values in model column order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.crim,
            self.zn,
            self.indus,
            self.chas,
            self.nox,
            self.rm,
            self.age,
            self.dis,
            self.rad,
            self.tax,
            self.ptratio,
            self.b,
            self.lstat,
        ]
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.to_array()[feature.index()]
    }

    /// First field that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<(Feature, f64)> {
        Feature::ALL
            .into_iter()
            .map(|f| (f, self.get(f)))
            .find(|(_, v)| !v.is_finite())
    }
}

/// One applied adjustment rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub feature: Feature,
    pub value: f64,
    pub multiplier: f64,
}

/// Successful estimation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Raw model output before scaling.
    pub base_estimate: f64,
    /// `base_estimate * BASE_PRICE_SCALE`.
    pub base_price: f64,
    /// Applied rules, in application order.
    pub adjustments: Vec<Adjustment>,
    pub adjusted_price: f64,
}

impl Estimate {
    /// Combined multiplier of all adjustments.
    pub fn total_multiplier(&self) -> f64 {
        self.adjustments.iter().map(|a| a.multiplier).product()
    }
}

/// Process-level settings resolved from CLI flags and the environment.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Model artifact location.
    pub model_path: PathBuf,
    /// When set, the artifact is not loaded and this value is used as the base estimate.
    pub base_estimate: Option<f64>,
}
