//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimation code stays free of presentation concerns
//! - output changes are localized

use crate::adjust::RULES;
use crate::domain::{Estimate, Feature};
use crate::error::EstimationError;
use crate::estimate::BASE_PRICE_SCALE;
use crate::estimate::batch::BatchStats;
use crate::io::ingest::RowError;

/// Dollar amount with thousands separators and two decimals.
///
/// Negative amounts keep the sign after the dollar sign: `$-1,234.50`.
/// The sign follows the input, so a small negative renders `$-0.00`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    format!("${sign}{}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_price_line(estimate: &Estimate) -> String {
    format!("Adjusted Predicted Price: {}", format_currency(estimate.adjusted_price))
}

pub fn format_error_line(err: &EstimationError) -> String {
    format!("Error: {err}")
}

/// Base estimate, per-feature multipliers and the final price.
pub fn format_breakdown(estimate: &Estimate, model_name: &str) -> String {
    let mut out = String::new();

    out.push_str("=== Price Estimate ===\n");
    out.push_str(&format!("Model: {model_name}\n"));
    out.push_str(&format!("Base estimate: {:.6}\n", estimate.base_estimate));
    out.push_str(&format!(
        "Base price (x{BASE_PRICE_SCALE}): {}\n",
        format_currency(estimate.base_price)
    ));

    out.push_str("\nAdjustments:\n");
    out.push_str(&format!("{:<8} {:>12} {:>10}\n", "feature", "value", "x"));
    out.push_str(&format!("{:-<8} {:-<12} {:-<10}\n", "", "", ""));
    for a in &estimate.adjustments {
        out.push_str(&format!(
            "{:<8} {:>12} {:>10.2}\n",
            a.feature.name(),
            format_value(a.value),
            a.multiplier
        ));
    }
    out.push_str(&format!("Combined multiplier: {:.6}\n\n", estimate.total_multiplier()));
    out.push_str(&format_price_line(estimate));
    out.push('\n');

    out
}

/// Every rule's bands and fallback.
pub fn format_rule_table() -> String {
    let mut out = String::new();
    out.push_str(&format!("Base price = model estimate x {BASE_PRICE_SCALE}\n\n"));

    for rule in &RULES {
        out.push_str(&format!("{:<8} {}\n", rule.feature.name(), rule.feature.description()));
        for band in rule.bands {
            out.push_str(&format!("  {:<14} x{:.2}\n", band.label(), band.multiplier));
        }
        out.push_str(&format!("  {:<14} x{:.2}\n", "otherwise", rule.fallback));
    }

    let unadjusted: Vec<&str> = Feature::ALL
        .into_iter()
        .filter(|f| !RULES.iter().any(|r| r.feature == *f))
        .map(Feature::name)
        .collect();
    if !unadjusted.is_empty() {
        out.push_str(&format!("\nNot adjusted (model input only): {}\n", unadjusted.join(", ")));
    }

    out
}

pub fn format_batch_summary(stats: BatchStats, row_errors: &[RowError]) -> String {
    let mut out = format!(
        "Estimated {} row(s), {} failed, {} skipped at ingest.\n",
        stats.estimated,
        stats.failed,
        row_errors.len()
    );
    for e in row_errors {
        let id = e.id.as_deref().unwrap_or("-");
        out.push_str(&format!("  line {} ({id}): {}\n", e.line, e.message));
    }
    out
}

fn format_value(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}
