use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::pages;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Form pages
        .route("/", get(pages::show_form))
        .route("/predict", post(pages::predict))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::FeatureSchema;
    use crate::infrastructure::model::LinearModelArtifact;

    fn test_state() -> AppState {
        let artifact: LinearModelArtifact = serde_json::from_str(
            r#"{
                "name": "insurance-expenses",
                "version": "test",
                "schema_version": 1,
                "columns": [
                    "age", "bmi", "children", "sex_male", "smoker_yes",
                    "region_northwest", "region_southeast", "region_southwest"
                ],
                "intercept": -11938.54,
                "coefficients": [256.86, 339.19, 475.5, -131.31, 23848.53, -352.96, -1035.02, -960.05]
            }"#,
        )
        .unwrap();

        let schema = FeatureSchema::v1();
        artifact.verify_against(&schema).unwrap();

        AppState::new(Arc::new(artifact), schema)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn predict_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_serves_blank_form() {
        let app = create_router_with_state(test_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Insurance Expense Predictor"));
        assert!(!html.contains("Predicted Expense"));
    }

    #[tokio::test]
    async fn test_predict_success_embeds_amount() {
        let app = create_router_with_state(test_state());

        let response = app
            .oneshot(predict_request(
                "age=32&sex=male&bmi=27.5&children=0&smoker=no&region=northeast",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Predicted Expense: "));
    }

    #[tokio::test]
    async fn test_predict_is_deterministic_across_requests() {
        let body = "age=32&sex=male&bmi=27.5&children=0&smoker=no&region=northeast";

        let first = body_string(
            create_router_with_state(test_state())
                .oneshot(predict_request(body))
                .await
                .unwrap(),
        )
        .await;
        let second = body_string(
            create_router_with_state(test_state())
                .oneshot(predict_request(body))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_submission_renders_blank_form() {
        let app = create_router_with_state(test_state());

        // bmi missing entirely
        let response = app
            .oneshot(predict_request(
                "age=32&sex=male&children=0&smoker=no&region=northeast",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(!html.contains("Predicted Expense"));
    }

    #[tokio::test]
    async fn test_smoker_predicts_materially_higher() {
        let base = "age=32&sex=male&bmi=27.5&children=0&region=northeast";

        let no = body_string(
            create_router_with_state(test_state())
                .oneshot(predict_request(&format!("{}&smoker=no", base)))
                .await
                .unwrap(),
        )
        .await;
        let yes = body_string(
            create_router_with_state(test_state())
                .oneshot(predict_request(&format!("{}&smoker=yes", base)))
                .await
                .unwrap(),
        )
        .await;

        let amount = |html: &str| -> f64 {
            let rest = html.split("Predicted Expense: ").nth(1).unwrap();
            rest.split('<').next().unwrap().parse().unwrap()
        };

        assert!(amount(&yes) > amount(&no) + 10_000.0);
    }

    #[tokio::test]
    async fn test_probes() {
        let response = create_router_with_state(test_state())
            .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = create_router_with_state(test_state())
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = create_router_with_state(test_state())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\"status\":\"healthy\""));
        assert!(body.contains("insurance-expenses"));
    }
}
