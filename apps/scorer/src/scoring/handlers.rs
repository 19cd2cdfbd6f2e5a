//! Axum route handlers for the Scoring API. One parameter per request.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::scoring::{
    score_boolean, score_quantitative, BenefitType, ResumeQueryEngine, ScoreOutcome,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuantitativeScoreRequest {
    pub parameter: String,
    pub max_value: f64,
    pub benefit_type: String,
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ParameterScoreRequest {
    pub parameter: String,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub parameter: String,
    pub strategy: &'static str,
    #[serde(flatten)]
    pub outcome: ScoreOutcome,
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn respond(parameter: String, strategy: &'static str, outcome: ScoreOutcome) -> Json<ScoreResponse> {
    info!(
        "Scored '{}' ({}): {} {:?}",
        parameter, strategy, outcome.value, outcome.status
    );
    Json(ScoreResponse {
        parameter,
        strategy,
        outcome,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/scores/quantitative
pub async fn handle_quantitative(
    State(state): State<AppState>,
    payload: Result<Json<QuantitativeScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let Json(request) = payload?;
    require_text("parameter", &request.parameter)?;
    require_text("resume_text", &request.resume_text)?;
    let benefit = request
        .benefit_type
        .parse::<BenefitType>()
        .map_err(AppError::Validation)?;

    let engine = ResumeQueryEngine::new(state.query_model.clone(), request.resume_text);
    let outcome = score_quantitative(
        &request.parameter,
        request.max_value,
        benefit,
        &engine,
        &state.scoring,
    )
    .await;

    Ok(respond(request.parameter, "quantitative", outcome))
}

/// POST /api/v1/scores/boolean
pub async fn handle_boolean(
    State(state): State<AppState>,
    payload: Result<Json<ParameterScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let Json(request) = payload?;
    require_text("parameter", &request.parameter)?;
    require_text("resume_text", &request.resume_text)?;

    let engine = ResumeQueryEngine::new(state.query_model.clone(), request.resume_text);
    let outcome = score_boolean(&request.parameter, &engine, &state.scoring).await;

    Ok(respond(request.parameter, "boolean", outcome))
}

/// POST /api/v1/scores/textual
pub async fn handle_textual(
    State(state): State<AppState>,
    payload: Result<Json<ParameterScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let Json(request) = payload?;
    require_text("parameter", &request.parameter)?;
    require_text("resume_text", &request.resume_text)?;

    let outcome = state
        .textual
        .score(&request.parameter, &request.resume_text, &state.scoring)
        .await;

    Ok(respond(request.parameter, "textual", outcome))
}
