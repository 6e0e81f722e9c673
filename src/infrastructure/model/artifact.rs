//! Serialized linear-regression artifact
//!
//! The artifact file is produced by the training pipeline and is an
//! external contract: a JSON document carrying the fitted intercept and
//! one coefficient per feature column, together with the exact column
//! layout it was trained against. The loader refuses any artifact whose
//! declared columns disagree with the schema compiled into this binary;
//! a mismatch would not crash at predict time, it would silently return
//! wrong numbers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::schema::{EncodedFeatureRow, FeatureSchema};
use crate::domain::{DomainError, Predictor};

/// A trained linear model, loaded once at startup and immutable after.
///
/// Holds no interior mutability, so a shared reference is safe to call
/// from concurrent requests without locking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    name: String,
    version: String,
    schema_version: u32,
    columns: Vec<String>,
    intercept: f64,
    coefficients: Vec<f64>,
    /// Free-form provenance string from the training pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trained_with: Option<String>,
}

impl LinearModelArtifact {
    /// Load an artifact file and verify it against the expected schema.
    ///
    /// Fails with [`DomainError::ArtifactLoad`] if the file is missing,
    /// unreadable, structurally invalid, or trained against a different
    /// column layout than `schema`. Called once, before the server binds.
    pub fn load(path: &Path, schema: &FeatureSchema) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::artifact_load(format!("cannot read {}: {}", path.display(), e))
        })?;

        let artifact: Self = serde_json::from_str(&raw).map_err(|e| {
            DomainError::artifact_load(format!("cannot parse {}: {}", path.display(), e))
        })?;

        artifact.verify_against(schema)?;
        Ok(artifact)
    }

    /// Check structural soundness and schema agreement.
    pub fn verify_against(&self, schema: &FeatureSchema) -> Result<(), DomainError> {
        if self.coefficients.len() != self.columns.len() {
            return Err(DomainError::artifact_load(format!(
                "artifact declares {} columns but carries {} coefficients",
                self.columns.len(),
                self.coefficients.len()
            )));
        }

        if self.coefficients.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err(DomainError::artifact_load(
                "artifact contains non-finite parameters",
            ));
        }

        if self.schema_version != schema.version() {
            return Err(DomainError::artifact_load(format!(
                "artifact was trained against schema version {}, this build expects {}",
                self.schema_version,
                schema.version()
            )));
        }

        let expected = schema.column_names();
        let declared: Vec<&str> = self.columns.iter().map(String::as_str).collect();

        if declared != expected {
            return Err(DomainError::artifact_load(format!(
                "artifact column layout {:?} does not match expected {:?}",
                declared, expected
            )));
        }

        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Predictor for LinearModelArtifact {
    fn predict(&self, row: &EncodedFeatureRow) -> Result<f64, DomainError> {
        let values = row.values();

        if values.len() != self.coefficients.len() {
            return Err(DomainError::prediction(format!(
                "row has {} values, artifact expects {}",
                values.len(),
                self.coefficients.len()
            )));
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum();

        Ok(self.intercept + dot)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::{InputRecord, Region, Sex, SmokerStatus};

    fn artifact() -> LinearModelArtifact {
        serde_json::from_str(artifact_json()).unwrap()
    }

    fn artifact_json() -> &'static str {
        r#"{
            "name": "insurance-expenses",
            "version": "2024-01-test",
            "schema_version": 1,
            "columns": [
                "age", "bmi", "children", "sex_male", "smoker_yes",
                "region_northwest", "region_southeast", "region_southwest"
            ],
            "intercept": -11938.54,
            "coefficients": [256.86, 339.19, 475.5, -131.31, 23848.53, -352.96, -1035.02, -960.05]
        }"#
    }

    fn record() -> InputRecord {
        InputRecord {
            age: 32,
            sex: Sex::Male,
            bmi: 27.5,
            children: 0,
            smoker: SmokerStatus::No,
            region: Region::Northeast,
        }
    }

    #[test]
    fn test_parse_and_verify() {
        let artifact = artifact();

        assert!(artifact.verify_against(&FeatureSchema::v1()).is_ok());
        assert_eq!(artifact.name(), "insurance-expenses");
        assert_eq!(artifact.version(), "2024-01-test");
        assert_eq!(
            artifact.columns().len(),
            FeatureSchema::v1().columns().len()
        );
    }

    #[test]
    fn test_predict_is_deterministic() {
        let artifact = artifact();
        let row = FeatureSchema::v1().encode(&record());

        let first = artifact.predict(&row).unwrap();
        let second = artifact.predict(&row).unwrap();

        assert_eq!(first, second);
        assert!(first.is_finite());
    }

    #[test]
    fn test_predict_matches_hand_computed_dot_product() {
        let artifact = artifact();
        let row = FeatureSchema::v1().encode(&record());

        let expected = -11938.54 + 256.86 * 32.0 + 339.19 * 27.5 - 131.31;
        let got = artifact.predict(&row).unwrap();

        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn test_row_length_mismatch_is_a_prediction_error() {
        let mut artifact = artifact();
        artifact.coefficients.pop();
        artifact.columns.pop();

        let row = FeatureSchema::v1().encode(&record());
        let err = artifact.predict(&row).unwrap_err();

        assert!(matches!(err, DomainError::Prediction { .. }));
    }

    #[test]
    fn test_column_drift_fails_verification() {
        let mut artifact = artifact();
        artifact.columns.swap(0, 1);

        let err = artifact.verify_against(&FeatureSchema::v1()).unwrap_err();
        assert!(matches!(err, DomainError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_schema_version_drift_fails_verification() {
        let mut artifact = artifact();
        artifact.schema_version = 2;

        assert!(artifact.verify_against(&FeatureSchema::v1()).is_err());
    }

    #[test]
    fn test_coefficient_count_mismatch_fails_verification() {
        let mut artifact = artifact();
        artifact.coefficients.pop();

        assert!(artifact.verify_against(&FeatureSchema::v1()).is_err());
    }

    #[test]
    fn test_non_finite_parameters_fail_verification() {
        let mut artifact = artifact();
        artifact.coefficients[0] = f64::NAN;

        assert!(artifact.verify_against(&FeatureSchema::v1()).is_err());
    }

    #[test]
    fn test_load_missing_file_is_an_artifact_load_error() {
        let err = LinearModelArtifact::load(
            Path::new("/nonexistent/model.json"),
            &FeatureSchema::v1(),
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::ArtifactLoad { .. }));
    }
}
