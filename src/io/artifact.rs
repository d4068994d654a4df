//! Read model artifact files.
//!
//! The artifact is a JSON description of a fitted linear model:
//! - model name
//! - feature names (must match the fixed feature order)
//! - intercept + one coefficient per feature
//! - optional standard scaler (`mean`, `scale`) applied before the dot product
//!
//! Any problem here is a startup failure (exit code 2).

use std::fs::File;
use std::path::Path;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, Feature};
use crate::error::AppError;
use crate::models::{LinearModel, StandardScaler};

/// On-disk schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub features: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub scaler: Option<ScalerArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Load and validate a model artifact.
pub fn load_model(path: &Path) -> Result<LinearModel, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open model artifact '{}': {e}", path.display())))?;
    let artifact: ModelArtifact = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid model artifact '{}': {e}", path.display())))?;
    let model = model_from_artifact(artifact)?;
    tracing::info!(path = %path.display(), model = %model.name, "loaded model artifact");
    Ok(model)
}

/// Validate an artifact and build the model.
pub fn model_from_artifact(artifact: ModelArtifact) -> Result<LinearModel, AppError> {
    let expected: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
    let names_match = artifact.features.len() == FEATURE_COUNT
        && artifact
            .features
            .iter()
            .zip(&expected)
            .all(|(a, e)| a.eq_ignore_ascii_case(e));
    if !names_match {
        return Err(AppError::new(
            2,
            format!(
                "Model features [{}] do not match expected order [{}].",
                artifact.features.join(", "),
                expected.join(", ")
            ),
        ));
    }

    if !artifact.intercept.is_finite() {
        return Err(AppError::new(2, "Model intercept must be finite."));
    }
    check_vector("coefficients", &artifact.coefficients)?;

    let scaler = match artifact.scaler {
        Some(s) => {
            check_vector("scaler.mean", &s.mean)?;
            check_vector("scaler.scale", &s.scale)?;
            if s.scale.iter().any(|v| *v == 0.0) {
                return Err(AppError::new(2, "Model scaler.scale entries must be non-zero."));
            }
            Some(StandardScaler {
                mean: DVector::from_vec(s.mean),
                scale: DVector::from_vec(s.scale),
            })
        }
        None => None,
    };

    Ok(LinearModel {
        name: artifact.name,
        intercept: artifact.intercept,
        coefficients: DVector::from_vec(artifact.coefficients),
        scaler,
    })
}

fn check_vector(label: &str, values: &[f64]) -> Result<(), AppError> {
    if values.len() != FEATURE_COUNT {
        return Err(AppError::new(
            2,
            format!("Model {label} has {} entries; expected {FEATURE_COUNT}.", values.len()),
        ));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AppError::new(2, format!("Model {label} must be finite.")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureVector;
    use crate::models::PredictiveModel;

    fn artifact() -> ModelArtifact {
        ModelArtifact {
            name: "test-linear".to_string(),
            features: Feature::ALL.iter().map(|f| f.name().to_string()).collect(),
            intercept: 2.2,
            coefficients: vec![0.0; FEATURE_COUNT],
            scaler: None,
        }
    }

    #[test]
    fn loads_valid_artifact_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut a = artifact();
        a.scaler = Some(ScalerArtifact {
            mean: vec![1.0; FEATURE_COUNT],
            scale: vec![2.0; FEATURE_COUNT],
        });
        std::fs::write(&path, serde_json::to_string_pretty(&a).unwrap()).unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.name(), "test-linear");
        assert!(model.scaler.is_some());
        assert!((model.predict(&FeatureVector::default()).unwrap() - 2.2).abs() < 1e-12);
    }

    #[test]
    fn bundled_model_predicts_first_boston_tract() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("model.json");
        let model = load_model(&path).unwrap();
        let fv = FeatureVector::from_array([
            0.00632, 18.0, 2.31, 0.0, 0.538, 6.575, 65.2, 4.09, 1.0, 296.0, 15.3, 396.9, 4.98,
        ]);
        let y = model.predict(&fv).unwrap();
        assert!((y - 3.001_016_614).abs() < 1e-9);
    }

    #[test]
    fn missing_file_is_exit_code_2() {
        let err = load_model(Path::new("/nonexistent/model.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_model(&path).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        let mut a = artifact();
        a.coefficients.pop();
        let err = model_from_artifact(a).unwrap_err();
        assert!(err.to_string().contains("coefficients has 12 entries"));
    }

    #[test]
    fn rejects_reordered_features() {
        let mut a = artifact();
        a.features.swap(0, 1);
        assert!(model_from_artifact(a).is_err());
    }

    #[test]
    fn rejects_zero_scale() {
        let mut a = artifact();
        let mut scale = vec![1.0; FEATURE_COUNT];
        scale[4] = 0.0;
        a.scaler = Some(ScalerArtifact {
            mean: vec![0.0; FEATURE_COUNT],
            scale,
        });
        assert!(model_from_artifact(a).unwrap_err().to_string().contains("non-zero"));
    }
}
