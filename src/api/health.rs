//! Health check endpoints for liveness and readiness probes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::domain::input::{InputRecord, Region, Sex, SmokerStatus};
use crate::domain::predict_record;

use super::state::AppState;

/// Health response with artifact identity
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Identity of the loaded artifact
#[derive(Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: Some(ModelInfo {
            name: state.predictor.name().to_string(),
            version: state.predictor.version().to_string(),
        }),
        message: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check - runs one reference submission through the loaded
/// artifact so a broken artifact shows up as 503, not as wrong numbers.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    match predict_record(&state.schema, state.predictor.as_ref(), &reference_record()) {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: HealthStatus::Healthy,
                version: env!("CARGO_PKG_VERSION").to_string(),
                model: None,
                message: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: HealthStatus::Unhealthy,
                version: env!("CARGO_PKG_VERSION").to_string(),
                model: None,
                message: Some(e.to_string()),
            }),
        ),
    }
}

/// Liveness check - verifies the process responds at all
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

fn reference_record() -> InputRecord {
    InputRecord {
        age: 32,
        sex: Sex::Male,
        bmi: 27.5,
        children: 0,
        smoker: SmokerStatus::No,
        region: Region::Northeast,
    }
}
