//! Boolean scoring: a yes/no question answered as 100 or 0.

use tracing::error;

use crate::scoring::extract::is_affirmative;
use crate::scoring::outcome::{ScoreOutcome, ScoringError, MAX_SCORE, MIN_SCORE};
use crate::scoring::prompts::{render, BOOLEAN_QUERY_TEMPLATE};
use crate::scoring::{QueryEngine, ScoringContext};

/// Scores 100 if the answer contains an affirmative token, otherwise 0.
pub async fn score_boolean(
    parameter: &str,
    engine: &dyn QueryEngine,
    ctx: &ScoringContext,
) -> ScoreOutcome {
    match try_score(parameter, engine, ctx).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Error in boolean scoring for '{parameter}': {e}");
            ScoreOutcome::failed(&e)
        }
    }
}

async fn try_score(
    parameter: &str,
    engine: &dyn QueryEngine,
    ctx: &ScoringContext,
) -> Result<ScoreOutcome, ScoringError> {
    let query = render(BOOLEAN_QUERY_TEMPLATE, &[("{parameter}", parameter)]);
    let answer = ctx.query(engine, &query).await?;

    if answer.trim().is_empty() {
        return Ok(ScoreOutcome::no_answer());
    }

    let score = if is_affirmative(&answer) {
        MAX_SCORE
    } else {
        MIN_SCORE
    };
    Ok(ScoreOutcome::computed(score))
}
