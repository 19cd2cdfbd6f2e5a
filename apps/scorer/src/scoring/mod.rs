//! Parameter scoring: quantitative, boolean and textual strategies.
//!
//! Every scorer returns a `ScoreOutcome` and never an error: failures are logged
//! and collapse to a zero score with `ScoreStatus::Failed`.

pub mod boolean;
pub mod extract;
pub mod handlers;
pub mod outcome;
pub mod pacing;
pub mod prompts;
pub mod quantitative;
pub mod query_engine;
pub mod textual;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub use boolean::score_boolean;
pub use outcome::{ScoreOutcome, ScoreStatus, ScoringError};
pub use quantitative::{score_quantitative, BenefitType};
pub use query_engine::{QueryEngine, ResumeQueryEngine};
pub use textual::TextualScorer;

use pacing::{FixedDelay, RateLimiter};

/// Call timeout used when none is configured.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);
/// Pause after each query-engine call when none is configured.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Explicit settings shared by the scorers: pacing and the per-call timeout.
#[derive(Clone)]
pub struct ScoringContext {
    pub limiter: Arc<dyn RateLimiter>,
    pub call_timeout: Duration,
}

impl ScoringContext {
    pub fn new(limiter: Arc<dyn RateLimiter>, call_timeout: Duration) -> Self {
        Self {
            limiter,
            call_timeout,
        }
    }

    /// Runs one query-engine call under the limiter and the timeout.
    pub(crate) async fn query(
        &self,
        engine: &dyn QueryEngine,
        text: &str,
    ) -> Result<String, ScoringError> {
        self.limiter.before_call().await;
        let answer = self
            .with_timeout(engine.query(text))
            .await?
            .map_err(ScoringError::Query)?;
        self.limiter.after_call().await;
        Ok(answer)
    }

    pub(crate) async fn with_timeout<F: Future>(&self, fut: F) -> Result<F::Output, ScoringError> {
        tokio::time::timeout(self.call_timeout, fut)
            .await
            .map_err(|_| ScoringError::Timeout(self.call_timeout))
    }
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self::new(Arc::new(FixedDelay(DEFAULT_PACING)), DEFAULT_CALL_TIMEOUT)
    }
}
