//! Threshold bands and the rule type built from them.
//!
//! A rule is an ordered list of disjoint bands plus a fallback multiplier. The
//! first band that contains the value wins; if none does, the fallback applies.

use serde::Serialize;

use crate::domain::Feature;

/// One end of a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Bound {
    Unbounded,
    Inclusive(f64),
    Exclusive(f64),
}

impl Bound {
    fn admits_above(self, v: f64) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::Inclusive(x) => v >= x,
            Bound::Exclusive(x) => v > x,
        }
    }

    fn admits_below(self, v: f64) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::Inclusive(x) => v <= x,
            Bound::Exclusive(x) => v < x,
        }
    }
}

/// A numeric interval mapped to a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub lower: Bound,
    pub upper: Bound,
    pub multiplier: f64,
}

impl Band {
    pub const fn new(lower: Bound, upper: Bound, multiplier: f64) -> Self {
        Self {
            lower,
            upper,
            multiplier,
        }
    }

    /// `true` if `v` lies inside the band. NaN is never contained.
    pub fn contains(&self, v: f64) -> bool {
        self.lower.admits_above(v) && self.upper.admits_below(v)
    }

    /// Interval notation, e.g. `[1, 5)`, `< 1`, `> 25`, `== 1`.
    pub fn label(&self) -> String {
        match (self.lower, self.upper) {
            (Bound::Unbounded, Bound::Unbounded) => "any".to_string(),
            (Bound::Unbounded, Bound::Exclusive(x)) => format!("< {x}"),
            (Bound::Unbounded, Bound::Inclusive(x)) => format!("<= {x}"),
            (Bound::Exclusive(x), Bound::Unbounded) => format!("> {x}"),
            (Bound::Inclusive(x), Bound::Unbounded) => format!(">= {x}"),
            (Bound::Inclusive(a), Bound::Inclusive(b)) if a == b => format!("== {a}"),
            (lo, hi) => {
                let (open, a) = match lo {
                    Bound::Inclusive(a) => ('[', a),
                    Bound::Exclusive(a) => ('(', a),
                    Bound::Unbounded => ('(', f64::NEG_INFINITY),
                };
                let (close, b) = match hi {
                    Bound::Inclusive(b) => (']', b),
                    Bound::Exclusive(b) => (')', b),
                    Bound::Unbounded => (')', f64::INFINITY),
                };
                format!("{open}{a}, {b}{close}")
            }
        }
    }
}

/// Maps one feature's value to a price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustmentRule {
    pub feature: Feature,
    pub bands: &'static [Band],
    pub fallback: f64,
}

impl AdjustmentRule {
    pub fn multiplier(&self, value: f64) -> f64 {
        self.bands
            .iter()
            .find(|b| b.contains(value))
            .map_or(self.fallback, |b| b.multiplier)
    }
}
