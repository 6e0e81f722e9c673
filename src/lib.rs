//! Insurance Expense API
//!
//! Serves predictions of annual medical insurance expenses from a
//! previously trained regression model:
//! - typed validation of raw form submissions
//! - an explicit, versioned feature schema matching the training layout
//! - a model artifact loaded once at startup, fail-fast and read-only

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::AppState;
use domain::{FeatureSchema, Predictor};
use infrastructure::model::LinearModelArtifact;
use tracing::info;

/// Create the application state: load and verify the model artifact.
///
/// Any artifact problem (missing file, parse failure, column layout drift)
/// is fatal here, before the server accepts traffic.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let schema = FeatureSchema::v1();
    let artifact = LinearModelArtifact::load(&config.model.path, &schema)?;

    info!(
        path = %config.model.path.display(),
        name = artifact.name(),
        version = artifact.version(),
        columns = artifact.columns().len(),
        "Model artifact loaded"
    );

    Ok(AppState::new(Arc::new(artifact), schema))
}
