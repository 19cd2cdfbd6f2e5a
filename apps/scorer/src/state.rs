use std::sync::Arc;

use crate::llm_client::CompletionModel;
use crate::scoring::{ScoringContext, TextualScorer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model behind the per-request resume query engine.
    pub query_model: Arc<dyn CompletionModel>,
    pub textual: Arc<TextualScorer>,
    pub scoring: ScoringContext,
}
