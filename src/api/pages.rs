//! Form page handlers: GET `/` and POST `/predict`
//!
//! The page deliberately renders a failed submission the same way as an
//! empty form; whether users should see validation errors is an unresolved
//! product decision upstream. [`PageState`] keeps the three states distinct
//! so a future template can surface them without touching the pipeline,
//! and the handler logs the error kind either way.

use std::collections::HashMap;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Form,
};
use tracing::{debug, error, warn};

use crate::domain::{run_pipeline, DomainError, PredictionResult};

use super::state::AppState;

/// What the form page has to show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageState {
    /// No submission yet
    Blank,
    /// Last submission predicted successfully
    Predicted(PredictionResult),
    /// Last submission failed; rendered like [`PageState::Blank`] by the
    /// default template
    Failed,
}

/// GET / - the empty form
pub async fn show_form() -> impl IntoResponse {
    Html(render_page(PageState::Blank))
}

/// POST /predict - one validate, encode, infer, format transaction
pub async fn predict(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let page = match run_pipeline(&state.schema, state.predictor.as_ref(), &form) {
        Ok(result) => {
            debug!(amount = result.amount(), "Prediction succeeded");
            PageState::Predicted(result)
        }
        Err(DomainError::Validation { field, reason }) => {
            warn!(field = %field, reason = %reason, "Rejected submission");
            PageState::Failed
        }
        Err(e) => {
            error!(error = %e, "Prediction failed on a valid submission");
            PageState::Failed
        }
    };

    Html(render_page(page))
}

fn render_page(state: PageState) -> String {
    let result_section = match state {
        PageState::Predicted(result) => {
            format!("<h3>Predicted Expense: {}</h3>\n", result)
        }
        PageState::Blank | PageState::Failed => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Insurance Expense Predictor</title></head>
<body>
<h2>Insurance Expense Predictor</h2>
<form method="POST" action="/predict">
  Age: <input name="age" type="number" required><br><br>
  Sex:
  <select name="sex">
    <option value="male">Male</option>
    <option value="female">Female</option>
  </select><br><br>
  BMI: <input name="bmi" type="number" step="0.1" required><br><br>
  Children: <input name="children" type="number" required><br><br>
  Smoker:
  <select name="smoker">
    <option value="yes">Yes</option>
    <option value="no">No</option>
  </select><br><br>
  Region:
  <select name="region">
    <option value="northeast">Northeast</option>
    <option value="northwest">Northwest</option>
    <option value="southeast">Southeast</option>
    <option value="southwest">Southwest</option>
  </select><br><br>

  <button type="submit">Predict</button>
</form>
{result_section}</body>
</html>
"#
    )
}
