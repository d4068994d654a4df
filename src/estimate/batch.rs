//! Batch estimation over many feature rows.
//!
//! Rows are independent and the model is read-only, so they are estimated in
//! parallel. A failing row keeps its error; it never aborts the batch.

use rayon::prelude::*;

use crate::domain::Estimate;
use crate::error::EstimationError;
use crate::estimate::estimate;
use crate::io::ingest::FeatureRow;
use crate::models::PredictiveModel;

/// Result for one input row.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub id: String,
    pub line: usize,
    pub result: Result<Estimate, EstimationError>,
}

/// Summary counts for terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub estimated: usize,
    pub failed: usize,
}

/// Estimate every row, preserving input order.
pub fn estimate_batch(rows: &[FeatureRow], model: &dyn PredictiveModel) -> Vec<BatchOutcome> {
    rows.par_iter()
        .map(|row| {
            let result = estimate(&row.features, model);
            if let Err(err) = &result {
                tracing::warn!(id = %row.id, line = row.line, error = %err, "row estimation failed");
            }
            BatchOutcome {
                id: row.id.clone(),
                line: row.line,
                result,
            }
        })
        .collect()
}

pub fn batch_stats(outcomes: &[BatchOutcome]) -> BatchStats {
    let estimated = outcomes.iter().filter(|o| o.result.is_ok()).count();
    BatchStats {
        estimated,
        failed: outcomes.len() - estimated,
    }
}
