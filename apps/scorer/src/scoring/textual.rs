//! Textual scoring: a model judges depth of knowledge, then restates the bare score.
//!
//! Two sequential completions per call: an evaluation with justification, then a
//! follow-up over that evaluation asking only for the number. The result is not
//! clamped; answers outside [0, 100] are passed through and flagged `OutOfRange`.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::FINETUNED_API_KEY_VAR;
use crate::llm_client::CompletionModel;
use crate::scoring::outcome::{ScoreOutcome, ScoreStatus, ScoringError, MAX_SCORE, MIN_SCORE};
use crate::scoring::prompts::{render, TEXTUAL_EVALUATION_TEMPLATE, TEXTUAL_SCORE_DIRECTIVE};
use crate::scoring::ScoringContext;

pub struct TextualScorer {
    /// `None` when the dedicated credential was not configured.
    model: Option<Arc<dyn CompletionModel>>,
}

impl TextualScorer {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model: Some(model) }
    }

    /// A scorer whose every call fails with a missing-credential error.
    pub fn without_credential() -> Self {
        Self { model: None }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn score(
        &self,
        parameter: &str,
        resume_text: &str,
        ctx: &ScoringContext,
    ) -> ScoreOutcome {
        match self.try_score(parameter, resume_text, ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error in textual scoring for '{parameter}': {e}");
                ScoreOutcome::failed(&e)
            }
        }
    }

    async fn try_score(
        &self,
        parameter: &str,
        resume_text: &str,
        ctx: &ScoringContext,
    ) -> Result<ScoreOutcome, ScoringError> {
        let model = self
            .model
            .as_ref()
            .ok_or(ScoringError::MissingCredential(FINETUNED_API_KEY_VAR))?;

        let evaluation = ctx
            .with_timeout(model.complete(&evaluation_prompt(parameter, resume_text)))
            .await??;
        debug!("Textual evaluation for '{parameter}': {evaluation}");

        let score_text = ctx
            .with_timeout(model.complete(&score_prompt(&evaluation)))
            .await??;

        let score = parse_score(&score_text)?;
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            warn!("Textual score for '{parameter}' outside [0, 100]: {score}");
            return Ok(ScoreOutcome::with_status(score, ScoreStatus::OutOfRange));
        }
        Ok(ScoreOutcome::computed(score))
    }
}

fn evaluation_prompt(parameter: &str, resume_text: &str) -> String {
    render(
        TEXTUAL_EVALUATION_TEMPLATE,
        &[("{resume_text}", resume_text), ("{parameter}", parameter)],
    )
}

fn score_prompt(evaluation: &str) -> String {
    format!("{evaluation}{TEXTUAL_SCORE_DIRECTIVE}")
}

/// The whole trimmed reply must be a finite number.
fn parse_score(text: &str) -> Result<f64, ScoringError> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScoringError::NotANumber(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::scoring::test_support::unpaced;

    const RESUME: &str = "Jane Doe. Built a distributed Raft-based KV store in Rust; \
        published at OSDI; 6 years backend engineering.";

    /// Replies from a script in order and records prompts.
    struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(vec![]),
            })
        }
    }

    #[async_trait]
    impl CompletionModel for ScriptedModel {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    struct SlowModel;

    #[async_trait]
    impl CompletionModel for SlowModel {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok("90".to_string())
        }
    }

    const EVALUATION: &str = "Score: 82.5\nJustification: built a Raft KV store, OSDI paper.";

    #[tokio::test]
    async fn test_two_calls_and_parsed_score() {
        let model = ScriptedModel::new(vec![Ok(EVALUATION.to_string()), Ok(" 82.5\n".to_string())]);
        let scorer = TextualScorer::new(model.clone());

        let outcome = scorer.score("distributed systems", RESUME, &unpaced()).await;
        assert_eq!(outcome, ScoreOutcome::computed(82.5));

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains(RESUME));
        assert!(prompts[0].contains("distributed systems"));
        assert!(prompts[0].contains("0.0 to 100.0"));
        assert_eq!(prompts[1], format!("{EVALUATION}{TEXTUAL_SCORE_DIRECTIVE}"));
    }

    #[tokio::test]
    async fn test_resume_with_placeholder_text_kept_verbatim() {
        let model = ScriptedModel::new(vec![Ok(EVALUATION.to_string()), Ok("40".to_string())]);
        let resume = "Maintains Rust {parameter} templates.";

        TextualScorer::new(model.clone())
            .score("Kubernetes", resume, &unpaced())
            .await;

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains(resume));
        assert!(!prompts[0].contains("Rust Kubernetes templates"));
    }

    #[tokio::test]
    async fn test_missing_credential_scores_zero() {
        let scorer = TextualScorer::without_credential();
        assert!(!scorer.is_configured());

        let outcome = scorer.score("distributed systems", RESUME, &unpaced()).await;
        assert_eq!(outcome.value, 0.0);
        assert_eq!(
            outcome.status,
            ScoreStatus::Failed {
                reason: "FINETUNED_API_KEY not found in environment".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_numeric_reply_scores_zero() {
        let model = ScriptedModel::new(vec![
            Ok(EVALUATION.to_string()),
            Ok("The score is 82.5".to_string()),
        ]);
        let outcome = TextualScorer::new(model)
            .score("distributed systems", RESUME, &unpaced())
            .await;
        assert_eq!(outcome.value, 0.0);
        match outcome.status {
            ScoreStatus::Failed { reason } => assert!(reason.contains("The score is 82.5")),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_model_fault_on_first_call_skips_second() {
        let model = ScriptedModel::new(vec![Err(LlmError::Api {
            status: 400,
            message: "bad request".to_string(),
        })]);
        let outcome = TextualScorer::new(model.clone())
            .score("distributed systems", RESUME, &unpaced())
            .await;
        assert_eq!(outcome.value, 0.0);
        assert!(!outcome.is_valid());
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_passed_through_and_flagged() {
        let model = ScriptedModel::new(vec![Ok(EVALUATION.to_string()), Ok("150".to_string())]);
        let outcome = TextualScorer::new(model)
            .score("distributed systems", RESUME, &unpaced())
            .await;
        assert_eq!(outcome.value, 150.0);
        assert_eq!(outcome.status, ScoreStatus::OutOfRange);

        let model = ScriptedModel::new(vec![Ok(EVALUATION.to_string()), Ok("-5".to_string())]);
        let outcome = TextualScorer::new(model)
            .score("distributed systems", RESUME, &unpaced())
            .await;
        assert_eq!(outcome.value, -5.0);
        assert_eq!(outcome.status, ScoreStatus::OutOfRange);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_model_times_out() {
        let mut ctx = unpaced();
        ctx.call_timeout = Duration::from_secs(30);
        let outcome = TextualScorer::new(Arc::new(SlowModel))
            .score("distributed systems", RESUME, &ctx)
            .await;
        assert_eq!(outcome.value, 0.0);
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("  67.3 ").unwrap(), 67.3);
        assert_eq!(parse_score("100").unwrap(), 100.0);
        assert!(parse_score("NaN").is_err());
        assert!(parse_score("inf").is_err());
        assert!(parse_score("").is_err());
        assert!(parse_score("Score: 70").is_err());
    }
}
