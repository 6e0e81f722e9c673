//! Predictor trait and the validate -> encode -> predict -> round pipeline

use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::input::InputRecord;
use super::schema::{EncodedFeatureRow, FeatureSchema};

/// A loaded regression predictor.
///
/// Implementations must hold no request-scoped mutable state: after
/// construction the predictor is shared behind an `Arc` and called from
/// concurrent requests without synchronization.
#[cfg_attr(test, automock)]
pub trait Predictor: Send + Sync {
    /// Predict the annual expense for one encoded row.
    fn predict(&self, row: &EncodedFeatureRow) -> Result<f64, DomainError>;

    /// Human-readable artifact name.
    fn name(&self) -> &str;

    /// Artifact version string, for logs and the health surface.
    fn version(&self) -> &str;
}

/// Predicted annual expense, rounded to 2 decimal places
///
/// The currency unit is fixed by convention and not carried in the value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    amount: f64,
}

impl PredictionResult {
    /// Round a raw model output into a result.
    ///
    /// Non-finite output is a prediction failure, never a fabricated
    /// number.
    pub fn from_raw(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::prediction(format!(
                "model produced a non-finite value: {}",
                value
            )));
        }

        Ok(Self {
            amount: (value * 100.0).round() / 100.0,
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl std::fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.amount)
    }
}

/// Run one submission through the whole pipeline.
///
/// One atomic transaction per request: the raw form map is validated into
/// an [`InputRecord`], encoded against the schema, handed to the predictor
/// and rounded. The first failure terminates the request; no partial result
/// ever comes back.
pub fn run_pipeline(
    schema: &FeatureSchema,
    predictor: &dyn Predictor,
    form: &HashMap<String, String>,
) -> Result<PredictionResult, DomainError> {
    let record = InputRecord::from_form(form)?;
    predict_record(schema, predictor, &record)
}

/// Encode an already-validated record and invoke the predictor.
pub fn predict_record(
    schema: &FeatureSchema,
    predictor: &dyn Predictor,
    record: &InputRecord,
) -> Result<PredictionResult, DomainError> {
    let row = schema.encode(record);
    let raw = predictor.predict(&row)?;
    PredictionResult::from_raw(raw)
}
