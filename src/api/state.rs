//! Application state shared across request handlers

use std::sync::Arc;

use crate::domain::{FeatureSchema, Predictor};

/// Application state: the loaded artifact and the schema it was verified
/// against. Both are constructed once at startup and read-only afterwards;
/// handlers clone the `Arc`s, never the contents.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
    pub schema: Arc<FeatureSchema>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>, schema: FeatureSchema) -> Self {
        Self {
            predictor,
            schema: Arc::new(schema),
        }
    }
}
