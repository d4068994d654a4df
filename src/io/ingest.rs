//! CSV ingest for batch estimation.
//!
//! Turns a CSV of feature rows into `FeatureRow`s.
//!
//! - **Strict schema**: all thirteen feature columns must exist (exit code 2)
//! - **Row-level validation**: unparseable rows are skipped and reported
//! - `id` is optional; rows without one are named after their line number

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{FEATURE_COUNT, Feature, FeatureVector};
use crate::error::AppError;

/// One parsed input row.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    pub id: String,
    /// 1-based line number in the source file.
    pub line: usize,
    pub features: FeatureVector,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: parsed rows + row errors.
#[derive(Debug, Clone)]
pub struct IngestedRows {
    pub rows: Vec<FeatureRow>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Open and read a feature CSV.
pub fn load_feature_rows(path: &Path) -> Result<IngestedRows, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_feature_rows(file)
}

/// Read feature rows from any CSV source.
pub fn read_feature_rows<R: Read>(source: R) -> Result<IngestedRows, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let columns = resolve_feature_columns(&headers)?;
    let id_column = header_map.get("id").copied();

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let id = id_column
            .and_then(|i| record.get(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        match parse_features(&record, &columns) {
            Ok(features) => rows.push(FeatureRow {
                id: id.unwrap_or_else(|| format!("line-{line}")),
                line,
                features,
            }),
            Err(message) => row_errors.push(RowError { line, id, message }),
        }
    }

    if !row_errors.is_empty() {
        tracing::warn!(skipped = row_errors.len(), "skipped invalid CSV rows");
    }

    Ok(IngestedRows {
        rows,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// Column index for each feature, in feature order.
fn resolve_feature_columns(headers: &StringRecord) -> Result<[usize; FEATURE_COUNT], AppError> {
    let mut found: [Option<usize>; FEATURE_COUNT] = [None; FEATURE_COUNT];
    for (idx, name) in headers.iter().enumerate() {
        if let Some(f) = Feature::from_name(&normalize_header_name(name)) {
            found[f.index()].get_or_insert(idx);
        }
    }

    let missing: Vec<&str> = Feature::ALL
        .into_iter()
        .filter(|f| found[f.index()].is_none())
        .map(Feature::name)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::new(
            2,
            format!("Missing required feature column(s): {}", missing.join(", ")),
        ));
    }

    Ok(found.map(|c| c.unwrap_or_default()))
}

fn parse_features(record: &StringRecord, columns: &[usize; FEATURE_COUNT]) -> Result<FeatureVector, String> {
    let mut values = [0.0f64; FEATURE_COUNT];
    for f in Feature::ALL {
        let raw = record.get(columns[f.index()]).unwrap_or("");
        if raw.is_empty() {
            return Err(format!("Missing `{}` value.", f.name()));
        }
        values[f.index()] = raw
            .parse::<f64>()
            .map_err(|_| format!("Invalid `{}` value: '{raw}'.", f.name()))?;
    }
    Ok(FeatureVector::from_array(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,CRIM,ZN,INDUS,CHAS,NOX,RM,AGE,DIS,RAD,TAX,PTRATIO,B,LSTAT\n";

    #[test]
    fn reads_rows_with_ids() {
        let csv = format!(
            "{HEADER}h1,0.1,30,3,1,0.3,9,20,2,2,150,10,390,3\nh2,5,0,10,0,0.5,6,60,4,4,300,13,380,7\n"
        );
        let ingested = read_feature_rows(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_read, 2);
        assert!(ingested.row_errors.is_empty());
        assert_eq!(ingested.rows[0].id, "h1");
        assert_eq!(ingested.rows[0].line, 2);
        assert_eq!(ingested.rows[0].features.b, 390.0);
        assert_eq!(ingested.rows[1].features.tax, 300.0);
    }

    #[test]
    fn headers_are_case_insensitive_and_id_is_optional() {
        let csv = "\u{feff}lstat,b,ptratio,tax,rad,dis,age,rm,nox,chas,indus,zn,crim\n1,2,3,4,5,6,7,8,9,10,11,12,13\n";
        let ingested = read_feature_rows(csv.as_bytes()).unwrap();
        let row = &ingested.rows[0];
        assert_eq!(row.id, "line-2");
        assert_eq!(row.features.lstat, 1.0);
        assert_eq!(row.features.crim, 13.0);
    }

    #[test]
    fn mixed_case_headers_resolve_to_features() {
        let csv = "\u{feff}Crim,Zn,Indus,Chas,Nox,Rm,Age,Dis,Rad,Tax,PtRatio,b,Lstat,ID\n\
                   1,2,3,4,5,6,7,8,9,10,11,12,13,x9\n";
        let ingested = read_feature_rows(csv.as_bytes()).unwrap();
        let row = &ingested.rows[0];
        assert_eq!(row.id, "x9");
        assert_eq!(row.features.crim, 1.0);
        assert_eq!(row.features.ptratio, 11.0);
        assert_eq!(row.features.lstat, 13.0);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "CRIM,ZN,INDUS,CHAS,NOX,RM,AGE,DIS,RAD,TAX,PTRATIO,LSTAT\n";
        let err = read_feature_rows(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("B"));
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = format!(
            "{HEADER}ok,0,0,0,0,0,0,0,0,0,0,0,0,0\nbad,x,0,0,0,0,0,0,0,0,0,0,0,0\nempty,0,0,0,0,0,,0,0,0,0,0,0,0\n"
        );
        let ingested = read_feature_rows(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows.len(), 1);
        assert_eq!(ingested.row_errors.len(), 2);
        assert_eq!(ingested.row_errors[0].line, 3);
        assert_eq!(ingested.row_errors[0].id.as_deref(), Some("bad"));
        assert!(ingested.row_errors[0].message.contains("CRIM"));
        assert!(ingested.row_errors[1].message.contains("RM"));
    }
}
