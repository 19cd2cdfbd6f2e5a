//! Quantitative scoring: a numeric fact normalized against a ceiling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::scoring::extract::find_number;
use crate::scoring::outcome::{ScoreOutcome, ScoreStatus, ScoringError, MAX_SCORE, MIN_SCORE};
use crate::scoring::prompts::{render, QUANTITATIVE_QUERY_TEMPLATE};
use crate::scoring::{QueryEngine, ScoringContext};

/// Normalization direction for quantitative parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitType {
    /// Larger raw values score higher.
    Higher,
    /// Smaller raw values score higher.
    Lower,
}

impl FromStr for BenefitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "higher" => Ok(Self::Higher),
            "lower" => Ok(Self::Lower),
            other => Err(format!(
                "benefit_type must be 'higher' or 'lower', got '{other}'"
            )),
        }
    }
}

impl fmt::Display for BenefitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Higher => f.write_str("higher"),
            Self::Lower => f.write_str("lower"),
        }
    }
}

/// Maps a raw value onto [0, 100].
///
/// higher: `min(raw / max * 100, 100)`; lower: `max((1 - raw / max) * 100, 0)`.
pub fn normalize(raw: f64, max_value: f64, benefit: BenefitType) -> Result<f64, ScoringError> {
    if !max_value.is_finite() || max_value <= 0.0 {
        return Err(ScoringError::InvalidMaxValue(max_value));
    }
    let ratio = raw / max_value;
    let score = match benefit {
        BenefitType::Higher => ratio * 100.0,
        BenefitType::Lower => (1.0 - ratio) * 100.0,
    };
    Ok(score.clamp(MIN_SCORE, MAX_SCORE))
}

/// Asks `engine` for the numeric value of `parameter` and normalizes it.
///
/// An empty answer scores 0. An answer without a number is treated as a raw value
/// of 0 (so `Lower` scores 100) and flagged `NoNumber`. Errors score 0.
pub async fn score_quantitative(
    parameter: &str,
    max_value: f64,
    benefit: BenefitType,
    engine: &dyn QueryEngine,
    ctx: &ScoringContext,
) -> ScoreOutcome {
    match try_score(parameter, max_value, benefit, engine, ctx).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Error in quantitative scoring for '{parameter}': {e}");
            ScoreOutcome::failed(&e)
        }
    }
}

async fn try_score(
    parameter: &str,
    max_value: f64,
    benefit: BenefitType,
    engine: &dyn QueryEngine,
    ctx: &ScoringContext,
) -> Result<ScoreOutcome, ScoringError> {
    let query = render(QUANTITATIVE_QUERY_TEMPLATE, &[("{parameter}", parameter)]);
    let answer = ctx.query(engine, &query).await?;

    if answer.trim().is_empty() {
        debug!("No answer for quantitative parameter '{parameter}'");
        return Ok(ScoreOutcome::no_answer());
    }

    let (raw, status) = match find_number(&answer) {
        Some(raw) => (raw, ScoreStatus::Computed),
        None => (0.0, ScoreStatus::NoNumber),
    };
    let score = normalize(raw, max_value, benefit)?;

    debug!("Quantitative '{parameter}': raw={raw}, max={max_value}, benefit={benefit}, score={score}");
    Ok(ScoreOutcome::with_status(score, status))
}
