//! Score values and the validity status carried alongside them.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmError;

/// Lower bound of every score.
pub const MIN_SCORE: f64 = 0.0;
/// Upper bound of every score.
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("{0} not found in environment")]
    MissingCredential(&'static str),

    #[error("query engine failed: {0}")]
    Query(anyhow::Error),

    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("external call timed out after {0:?}")]
    Timeout(Duration),

    #[error("max_value must be a positive finite number, got {0}")]
    InvalidMaxValue(f64),

    #[error("could not convert score text to a number: {0:?}")]
    NotANumber(String),
}

/// How a score value came about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Derived from a real answer.
    Computed,
    /// The answer held no numeric literal; the raw value defaulted to zero.
    NoNumber,
    /// The engine returned nothing.
    NoAnswer,
    /// The model answered outside [0, 100]; the value is passed through as-is.
    OutOfRange,
    /// Scoring failed; the value is the zero floor.
    Failed { reason: String },
}

/// A score plus its validity status. Converts into the bare `f64` for callers
/// that only want the number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub value: f64,
    pub status: ScoreStatus,
}

impl ScoreOutcome {
    pub fn computed(value: f64) -> Self {
        Self {
            value,
            status: ScoreStatus::Computed,
        }
    }

    pub fn with_status(value: f64, status: ScoreStatus) -> Self {
        Self { value, status }
    }

    pub fn no_answer() -> Self {
        Self {
            value: MIN_SCORE,
            status: ScoreStatus::NoAnswer,
        }
    }

    pub fn failed(error: &ScoringError) -> Self {
        Self {
            value: MIN_SCORE,
            status: ScoreStatus::Failed {
                reason: error.to_string(),
            },
        }
    }

    /// True unless scoring failed or the engine gave no answer.
    pub fn is_valid(&self) -> bool {
        !matches!(
            self.status,
            ScoreStatus::Failed { .. } | ScoreStatus::NoAnswer
        )
    }
}

impl From<ScoreOutcome> for f64 {
    fn from(outcome: ScoreOutcome) -> Self {
        outcome.value
    }
}
