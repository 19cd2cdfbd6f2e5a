pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/scores/quantitative",
            post(handlers::handle_quantitative),
        )
        .route("/api/v1/scores/boolean", post(handlers::handle_boolean))
        .route("/api/v1/scores/textual", post(handlers::handle_textual))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::{CompletionModel, LlmError};
    use crate::scoring::pacing::NoDelay;
    use crate::scoring::{ScoringContext, TextualScorer, DEFAULT_CALL_TIMEOUT};

    /// Answers every prompt with the same text and counts calls.
    struct FixedModel {
        reply: &'static str,
        calls: Mutex<u32>,
    }

    impl FixedModel {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl CompletionModel for FixedModel {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.reply.to_string())
        }
    }

    fn router(query_model: Arc<FixedModel>, textual: TextualScorer) -> Router {
        build_router(AppState {
            query_model,
            textual: Arc::new(textual),
            scoring: ScoringContext::new(Arc::new(NoDelay), DEFAULT_CALL_TIMEOUT),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(FixedModel::new(""), TextualScorer::without_credential());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-scorer");
    }

    #[tokio::test]
    async fn test_quantitative_endpoint() {
        let app = router(FixedModel::new("8"), TextualScorer::without_credential());
        let (status, body) = post_json(
            app,
            "/api/v1/scores/quantitative",
            json!({
                "parameter": "years of Python experience",
                "max_value": 10.0,
                "benefit_type": "higher",
                "resume_text": "Python developer since 2016."
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["parameter"], "years of Python experience");
        assert_eq!(body["strategy"], "quantitative");
        assert_eq!(body["value"], 80.0);
        assert_eq!(body["status"]["kind"], "computed");
    }

    #[tokio::test]
    async fn test_quantitative_rejects_unknown_benefit_type() {
        let model = FixedModel::new("8");
        let app = router(model.clone(), TextualScorer::without_credential());
        let (status, body) = post_json(
            app,
            "/api/v1/scores/quantitative",
            json!({
                "parameter": "years",
                "max_value": 10.0,
                "benefit_type": "more",
                "resume_text": "resume"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(*model.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_quantitative_zero_max_is_failed_outcome_not_http_error() {
        let app = router(FixedModel::new("8"), TextualScorer::without_credential());
        let (status, body) = post_json(
            app,
            "/api/v1/scores/quantitative",
            json!({
                "parameter": "years",
                "max_value": 0.0,
                "benefit_type": "lower",
                "resume_text": "resume"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], 0.0);
        assert_eq!(body["status"]["kind"], "failed");
    }

    #[tokio::test]
    async fn test_boolean_endpoint() {
        let app = router(
            FixedModel::new("Yes, the candidate has this skill."),
            TextualScorer::without_credential(),
        );
        let (status, body) = post_json(
            app,
            "/api/v1/scores/boolean",
            json!({"parameter": "a driving licence", "resume_text": "Holds a B licence."}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], 100.0);
    }

    #[tokio::test]
    async fn test_blank_parameter_rejected() {
        let app = router(FixedModel::new("True"), TextualScorer::without_credential());
        let (status, body) = post_json(
            app,
            "/api/v1/scores/boolean",
            json!({"parameter": "  ", "resume_text": "resume"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "parameter cannot be empty");
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let app = router(FixedModel::new("True"), TextualScorer::without_credential());
        let (status, body) = post_json(
            app,
            "/api/v1/scores/boolean",
            json!({"parameter": "a PhD"}),
        )
        .await;
        assert!(status.is_client_error());
        assert_eq!(body["error"]["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_textual_without_credential() {
        let app = router(FixedModel::new(""), TextualScorer::without_credential());
        let (status, body) = post_json(
            app,
            "/api/v1/scores/textual",
            json!({"parameter": "machine learning", "resume_text": "resume"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], 0.0);
        assert_eq!(body["status"]["kind"], "failed");
    }

    #[tokio::test]
    async fn test_textual_with_model() {
        let textual = TextualScorer::new(FixedModel::new("74.5"));
        let app = router(FixedModel::new(""), textual);
        let (status, body) = post_json(
            app,
            "/api/v1/scores/textual",
            json!({"parameter": "machine learning", "resume_text": "Trained CNNs at scale."}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["strategy"], "textual");
        assert_eq!(body["value"], 74.5);
        assert_eq!(body["status"]["kind"], "computed");
    }
}
