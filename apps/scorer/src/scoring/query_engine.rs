//! Query engines answer natural-language questions about one candidate.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::llm_client::{CompletionModel, LlmError};
use crate::scoring::prompts::{render, RESUME_QUERY_TEMPLATE};

/// Answers a question about a candidate. Only the answer text is used; an empty
/// answer means "nothing found".
#[async_trait]
pub trait QueryEngine: Send + Sync {
    async fn query(&self, text: &str) -> Result<String>;
}

/// Answers questions by handing the whole resume to a completion model as context.
pub struct ResumeQueryEngine {
    model: Arc<dyn CompletionModel>,
    resume_text: String,
}

impl ResumeQueryEngine {
    pub fn new(model: Arc<dyn CompletionModel>, resume_text: impl Into<String>) -> Self {
        Self {
            model,
            resume_text: resume_text.into(),
        }
    }

    fn prompt(&self, question: &str) -> String {
        render(
            RESUME_QUERY_TEMPLATE,
            &[("{resume_text}", self.resume_text.as_str()), ("{question}", question)],
        )
    }
}

#[async_trait]
impl QueryEngine for ResumeQueryEngine {
    async fn query(&self, text: &str) -> Result<String> {
        match self.model.complete(&self.prompt(text)).await {
            Ok(answer) => Ok(answer.trim().to_string()),
            // The prompt asks for a blank reply when the resume lacks the fact.
            Err(LlmError::EmptyContent) => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}
