//! Core request-to-prediction pipeline: validation, encoding, inference

pub mod error;
pub mod input;
pub mod prediction;
pub mod schema;

pub use error::DomainError;
pub use input::{InputRecord, Region, Sex, SmokerStatus};
pub use prediction::{predict_record, run_pipeline, PredictionResult, Predictor};
pub use schema::{EncodedFeatureRow, FeatureColumn, FeatureSchema};

#[cfg(test)]
pub use prediction::MockPredictor;
