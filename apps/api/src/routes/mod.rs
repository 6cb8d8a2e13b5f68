pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Submission API
        .route("/api/v1/submissions", post(handlers::handle_submit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::conclusion::{ConclusionStrategy, RuleConcluder};
    use crate::dispatch::SubmissionDispatcher;
    use crate::pipeline::EligibilityPipeline;
    use crate::scoring::RuleScorer;
    use crate::sentiment::SentimentScorer;
    use crate::test_support::{RecordingTransport, StubTranslator};

    fn app(transport: Arc<RecordingTransport>) -> Router {
        let pipeline = EligibilityPipeline::new(
            Arc::new(StubTranslator::echo()),
            "en".to_string(),
            SentimentScorer::default(),
            RuleScorer::default(),
            ConclusionStrategy::Rules(RuleConcluder::default()),
            SubmissionDispatcher::new(Some("https://hook.example/motopack".to_string()), transport),
        );
        build_router(AppState::new(pipeline))
    }

    fn submission(policy_accepted: bool) -> Value {
        json!({
            "answers": [
                {"key": "full_name", "answer": {"type": "text", "value": "Luis Pérez"}},
                {"key": "driving_license", "answer": {"type": "choice", "value": "yes"}},
                {"key": "current_loans", "answer": {"type": "choice", "value": "none"}},
                {"key": "co_signer", "answer": {"type": "choice", "value": "yes"}},
                {"key": "monthly_income", "answer": {"type": "choice", "value": "over_3m"}},
                {"key": "business_story", "answer": {"type": "text", "value": "I love my business and my happy clients"}},
                {"key": "data_policy_accepted", "answer": {"type": "flag", "value": policy_accepted}}
            ]
        })
    }

    async fn post_json(app: Router, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/submissions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_wiring() {
        let response = app(Arc::new(RecordingTransport::with_status(200)))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "motopack-api");
        assert_eq!(body["conclusion_strategy"], "rules");
        assert_eq!(body["webhook_configured"], true);
    }

    #[tokio::test]
    async fn test_submission_is_evaluated_and_sent() {
        let transport = Arc::new(RecordingTransport::with_status(200));
        let (status, body) = post_json(app(transport.clone()), &submission(true)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["delivery"]["status"], "success");
        assert_eq!(body["eligibility"]["total"], 9);
        assert_eq!(
            body["status_message"],
            "Registration evaluated and sent successfully."
        );
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_policy_not_accepted_is_forbidden() {
        let transport = Arc::new(RecordingTransport::with_status(200));
        let (status, body) = post_json(app(transport.clone()), &submission(false)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "POLICY_NOT_ACCEPTED");
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_submission_gets_the_policy_message() {
        let transport = Arc::new(RecordingTransport::with_status(200));
        let (status, body) = post_json(app(transport.clone()), &json!({"answers": []})).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "POLICY_NOT_ACCEPTED");
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_number_is_a_validation_error() {
        let transport = Arc::new(RecordingTransport::with_status(200));
        let mut request = submission(true);
        request["answers"]
            .as_array_mut()
            .unwrap()
            .push(json!({"key": "dependents", "answer": {"type": "number", "value": 40}}));
        let (status, body) = post_json(app(transport.clone()), &request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("¿Cuántas personas dependen de ti?"));
        assert_eq!(transport.calls(), 0);
    }
}
