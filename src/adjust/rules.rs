//! The per-feature adjustment table.
//!
//! Each rule reads only its own feature. `B` deliberately has no rule: it is a
//! model input but never moves the adjusted price.

use crate::adjust::bands::{AdjustmentRule, Band};
use crate::domain::{Adjustment, Feature, FeatureVector};

use crate::adjust::bands::Bound::{Exclusive as Ex, Inclusive as In, Unbounded as Un};

/// Rules in application order (feature order, `B` skipped).
pub static RULES: [AdjustmentRule; 12] = [
    AdjustmentRule {
        feature: Feature::Crim,
        bands: &[
            Band::new(Un, Ex(1.0), 1.10),
            Band::new(In(1.0), Ex(5.0), 1.05),
            Band::new(In(5.0), Ex(10.0), 0.95),
        ],
        fallback: 0.85,
    },
    AdjustmentRule {
        feature: Feature::Zn,
        bands: &[
            Band::new(Ex(25.0), Un, 1.15),
            Band::new(In(10.0), In(25.0), 1.05),
        ],
        fallback: 0.90,
    },
    AdjustmentRule {
        feature: Feature::Indus,
        bands: &[
            Band::new(Un, Ex(5.0), 1.10),
            Band::new(In(5.0), Ex(15.0), 1.05),
        ],
        fallback: 0.95,
    },
    AdjustmentRule {
        feature: Feature::Chas,
        bands: &[Band::new(In(1.0), In(1.0), 1.20)],
        fallback: 0.95,
    },
    AdjustmentRule {
        feature: Feature::Nox,
        bands: &[
            Band::new(Un, Ex(0.4), 1.10),
            Band::new(In(0.4), Ex(0.6), 0.95),
            Band::new(In(0.6), Ex(0.8), 0.90),
        ],
        fallback: 0.85,
    },
    AdjustmentRule {
        feature: Feature::Rm,
        bands: &[
            Band::new(Ex(8.0), Un, 1.20),
            Band::new(In(7.0), In(8.0), 1.10),
            Band::new(In(5.0), Ex(7.0), 1.05),
        ],
        fallback: 0.90,
    },
    AdjustmentRule {
        feature: Feature::Age,
        bands: &[
            Band::new(Un, Ex(50.0), 1.10),
            Band::new(In(50.0), Ex(70.0), 1.05),
            Band::new(In(70.0), Ex(90.0), 0.95),
        ],
        fallback: 0.85,
    },
    AdjustmentRule {
        feature: Feature::Dis,
        bands: &[
            Band::new(Un, Ex(3.0), 1.10),
            Band::new(In(3.0), Ex(6.0), 1.05),
        ],
        fallback: 0.90,
    },
    AdjustmentRule {
        feature: Feature::Rad,
        bands: &[
            Band::new(Un, In(3.0), 1.10),
            Band::new(Ex(3.0), In(5.0), 1.05),
        ],
        fallback: 0.95,
    },
    AdjustmentRule {
        feature: Feature::Tax,
        bands: &[
            Band::new(Un, In(200.0), 1.10),
            Band::new(Ex(200.0), In(400.0), 0.95),
        ],
        fallback: 0.85,
    },
    AdjustmentRule {
        feature: Feature::Ptratio,
        bands: &[
            Band::new(Un, Ex(12.0), 1.10),
            Band::new(In(12.0), Ex(15.0), 1.05),
        ],
        fallback: 0.95,
    },
    AdjustmentRule {
        feature: Feature::Lstat,
        bands: &[
            Band::new(Un, Ex(5.0), 1.20),
            Band::new(In(5.0), Ex(10.0), 1.10),
        ],
        fallback: 0.80,
    },
];

/// Rule for `feature`, or `None` for features that are never adjusted.
pub fn rule_for(feature: Feature) -> Option<&'static AdjustmentRule> {
    RULES.iter().find(|r| r.feature == feature)
}

/// Multiply `price` by each rule's multiplier, in the order given.
///
/// Returns the final price and the applied adjustments.
pub fn apply_rules<'a, I>(price: f64, features: &FeatureVector, rules: I) -> (f64, Vec<Adjustment>)
where
    I: IntoIterator<Item = &'a AdjustmentRule>,
{
    let mut running = price;
    let mut applied = Vec::with_capacity(RULES.len());
    for rule in rules {
        let value = features.get(rule.feature);
        let multiplier = rule.multiplier(value);
        running *= multiplier;
        tracing::debug!(feature = %rule.feature, value, multiplier, running, "applied adjustment");
        applied.push(Adjustment {
            feature: rule.feature,
            value,
            multiplier,
        });
    }
    (running, applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjust::bands::Bound;

    fn m(feature: Feature, value: f64) -> f64 {
        rule_for(feature).unwrap().multiplier(value)
    }

    #[test]
    fn every_feature_but_b_has_one_rule() {
        for f in Feature::ALL {
            let count = RULES.iter().filter(|r| r.feature == f).count();
            let expected = if f == Feature::B { 0 } else { 1 };
            assert_eq!(count, expected, "{f}");
        }
        assert!(rule_for(Feature::B).is_none());
    }

    #[test]
    fn rules_follow_feature_order() {
        let order: Vec<Feature> = RULES.iter().map(|r| r.feature).collect();
        let expected: Vec<Feature> = Feature::ALL.into_iter().filter(|f| *f != Feature::B).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn bands_within_a_rule_are_disjoint() {
        // Probe each rule on a dense grid (plus every edge) and check at most one band matches.
        for rule in &RULES {
            let mut probes: Vec<f64> = (-200..=2000).map(|i| i as f64 * 0.25).collect();
            for b in rule.bands {
                for bound in [b.lower, b.upper] {
                    if let Bound::Inclusive(x) | Bound::Exclusive(x) = bound {
                        probes.push(x);
                    }
                }
            }
            for v in probes {
                let hits = rule.bands.iter().filter(|b| b.contains(v)).count();
                assert!(hits <= 1, "{} has overlapping bands at {v}", rule.feature);
            }
        }
    }

    #[test]
    fn crim_boundaries() {
        assert_eq!(m(Feature::Crim, 0.999), 1.10);
        assert_eq!(m(Feature::Crim, 1.0), 1.05);
        assert_eq!(m(Feature::Crim, 5.0), 0.95);
        assert_eq!(m(Feature::Crim, 10.0), 0.85);
        assert_eq!(m(Feature::Crim, -3.0), 1.10);
    }

    #[test]
    fn zn_boundaries() {
        assert_eq!(m(Feature::Zn, 25.0), 1.05);
        assert_eq!(m(Feature::Zn, 25.001), 1.15);
        assert_eq!(m(Feature::Zn, 10.0), 1.05);
        assert_eq!(m(Feature::Zn, 9.999), 0.90);
    }

    #[test]
    fn indus_boundaries() {
        assert_eq!(m(Feature::Indus, 4.999), 1.10);
        assert_eq!(m(Feature::Indus, 5.0), 1.05);
        assert_eq!(m(Feature::Indus, 15.0), 0.95);
    }

    #[test]
    fn chas_is_binary() {
        assert_eq!(m(Feature::Chas, 1.0), 1.20);
        for v in [0.0, 0.5, -1.0, 2.0, 0.999_999] {
            assert_eq!(m(Feature::Chas, v), 0.95, "CHAS={v}");
        }
    }

    #[test]
    fn nox_boundaries() {
        assert_eq!(m(Feature::Nox, 0.399), 1.10);
        assert_eq!(m(Feature::Nox, 0.4), 0.95);
        assert_eq!(m(Feature::Nox, 0.6), 0.90);
        assert_eq!(m(Feature::Nox, 0.8), 0.85);
    }

    #[test]
    fn rm_boundaries() {
        assert_eq!(m(Feature::Rm, 8.0), 1.10);
        assert_eq!(m(Feature::Rm, 8.001), 1.20);
        assert_eq!(m(Feature::Rm, 7.0), 1.10);
        assert_eq!(m(Feature::Rm, 6.999), 1.05);
        assert_eq!(m(Feature::Rm, 5.0), 1.05);
        assert_eq!(m(Feature::Rm, 4.999), 0.90);
    }

    #[test]
    fn age_boundaries() {
        assert_eq!(m(Feature::Age, 49.9), 1.10);
        assert_eq!(m(Feature::Age, 50.0), 1.05);
        assert_eq!(m(Feature::Age, 70.0), 0.95);
        assert_eq!(m(Feature::Age, 90.0), 0.85);
    }

    #[test]
    fn dis_boundaries() {
        assert_eq!(m(Feature::Dis, 2.99), 1.10);
        assert_eq!(m(Feature::Dis, 3.0), 1.05);
        assert_eq!(m(Feature::Dis, 6.0), 0.90);
    }

    #[test]
    fn rad_boundaries_close_on_the_right() {
        assert_eq!(m(Feature::Rad, 3.0), 1.10);
        assert_eq!(m(Feature::Rad, 3.001), 1.05);
        assert_eq!(m(Feature::Rad, 5.0), 1.05);
        assert_eq!(m(Feature::Rad, 5.001), 0.95);
    }

    #[test]
    fn tax_boundaries_close_on_the_right() {
        assert_eq!(m(Feature::Tax, 200.0), 1.10);
        assert_eq!(m(Feature::Tax, 200.5), 0.95);
        assert_eq!(m(Feature::Tax, 400.0), 0.95);
        assert_eq!(m(Feature::Tax, 400.5), 0.85);
    }

    #[test]
    fn ptratio_boundaries() {
        assert_eq!(m(Feature::Ptratio, 11.9), 1.10);
        assert_eq!(m(Feature::Ptratio, 12.0), 1.05);
        assert_eq!(m(Feature::Ptratio, 15.0), 0.95);
    }

    #[test]
    fn lstat_boundaries() {
        assert_eq!(m(Feature::Lstat, 4.9), 1.20);
        assert_eq!(m(Feature::Lstat, 5.0), 1.10);
        assert_eq!(m(Feature::Lstat, 10.0), 0.80);
    }

    #[test]
    fn apply_rules_records_each_step() {
        let features = FeatureVector::default();
        let (price, applied) = apply_rules(100.0, &features, RULES.iter());
        assert_eq!(applied.len(), 12);
        assert_eq!(applied[0].feature, Feature::Crim);
        assert_eq!(applied[11].feature, Feature::Lstat);
        let product: f64 = applied.iter().map(|a| a.multiplier).product();
        assert!((price - 100.0 * product).abs() < 1e-9);
    }
}
