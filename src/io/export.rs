//! Export batch results to CSV.
//!
//! One row per input row; failed rows carry their error message and empty price columns.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::estimate::batch::BatchOutcome;

const HEADER: [&str; 6] = ["id", "line", "base_estimate", "base_price", "adjusted_price", "error"];

/// Write batch results to a CSV file.
pub fn write_results_csv(path: &Path, outcomes: &[BatchOutcome]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, outcomes)
}

/// Write batch results as CSV to any writer.
pub fn write_results<W: Write>(sink: W, outcomes: &[BatchOutcome]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer
        .write_record(HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for o in outcomes {
        let line = o.line.to_string();
        let record = match &o.result {
            Ok(est) => [
                o.id.clone(),
                line,
                format!("{:.6}", est.base_estimate),
                format!("{:.2}", est.base_price),
                format!("{:.2}", est.adjusted_price),
                String::new(),
            ],
            Err(err) => [
                o.id.clone(),
                line,
                String::new(),
                String::new(),
                String::new(),
                err.to_string(),
            ],
        };
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
