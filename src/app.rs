//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the model once
//! - runs single or batch estimation
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{BatchArgs, Command, EstimateArgs, RulesArgs};
use crate::error::AppError;
use crate::estimate::batch::batch_stats;
use crate::estimate::estimate;

pub mod pipeline;

/// Entry point for the `price-estimator` binary.
pub fn run() -> Result<(), AppError> {
    // Plain `price-estimator --rm 6 ...` behaves like `price-estimator estimate --rm 6 ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::logging::init_tracing();

    match cli.command {
        Command::Estimate(args) => handle_estimate(args),
        Command::Batch(args) => handle_batch(args),
        Command::Rules(args) => handle_rules(args),
    }
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = pipeline::resolve_config(&args.model);
    let model = pipeline::load_predictor(&config)?;
    let features = args.features.to_features();

    let est = match estimate(&features, model.as_ref()) {
        Ok(est) => est,
        Err(err) => return Err(AppError::new(4, crate::report::format_error_line(&err))),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&est)
            .map_err(|e| AppError::new(4, format!("Failed to serialize estimate: {e}")))?;
        println!("{json}");
    } else if args.breakdown {
        print!("{}", crate::report::format_breakdown(&est, model.name()));
    } else {
        println!("{}", crate::report::format_price_line(&est));
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = pipeline::resolve_config(&args.model);
    let model = pipeline::load_predictor(&config)?;
    let run = pipeline::run_batch(&args.input, model.as_ref())?;

    let summary = crate::report::format_batch_summary(batch_stats(&run.outcomes), &run.ingest.row_errors);

    // Without `--output` the CSV owns stdout, so the summary moves to stderr.
    match &args.output {
        Some(path) => {
            crate::io::export::write_results_csv(path, &run.outcomes)?;
            print!("{summary}");
        }
        None => {
            crate::io::export::write_results(std::io::stdout().lock(), &run.outcomes)?;
            eprint!("{summary}");
        }
    }

    Ok(())
}

fn handle_rules(args: RulesArgs) -> Result<(), AppError> {
    if args.json {
        let json = serde_json::to_string_pretty(&crate::adjust::RULES)
            .map_err(|e| AppError::new(4, format!("Failed to serialize rules: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_rule_table());
    }
    Ok(())
}

/// Rewrite argv so `price-estimator` defaults to `price-estimator estimate`.
///
/// Rules:
/// - `price-estimator`                      -> `price-estimator estimate`
/// - `price-estimator --rm 6 ...`           -> `price-estimator estimate --rm 6 ...`
/// - `price-estimator --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("estimate".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "estimate" | "batch" | "rules");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "estimate".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_estimate() {
        assert_eq!(rewrite_args(argv(&["pe"])), argv(&["pe", "estimate"]));
    }

    #[test]
    fn leading_flag_defaults_to_estimate() {
        assert_eq!(
            rewrite_args(argv(&["pe", "--rm", "6"])),
            argv(&["pe", "estimate", "--rm", "6"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(argv(&["pe", "rules"])), argv(&["pe", "rules"]));
        assert_eq!(rewrite_args(argv(&["pe", "--help"])), argv(&["pe", "--help"]));
    }
}
