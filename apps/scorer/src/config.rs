use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::scoring::pacing::PacingMode;

/// Credential for the query-engine model.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
/// Credential for the dedicated textual-scoring model.
pub const FINETUNED_API_KEY_VAR: &str = "FINETUNED_API_KEY";

/// Service configuration loaded once from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Optional: without it the textual scorer reports a missing credential per call.
    pub finetuned_api_key: Option<String>,
    pub llm_api_url: String,
    pub llm_model: String,
    pub finetuned_model: String,
    pub llm_max_attempts: u32,
    pub call_timeout: Duration,
    pub pacing: PacingMode,
    pub pacing_delay: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_key: require_env(API_KEY_VAR)?,
            finetuned_api_key: optional_env(FINETUNED_API_KEY_VAR),
            llm_api_url: optional_env("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            finetuned_model: optional_env("FINETUNED_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_max_attempts: parse_env("LLM_MAX_ATTEMPTS", 1)?,
            call_timeout: Duration::from_secs(parse_nonzero_env("SCORING_CALL_TIMEOUT_SECS", 120)?),
            pacing: optional_env("SCORING_PACING")
                .map(|v| v.parse::<PacingMode>().map_err(|e| anyhow!(e)))
                .transpose()
                .context("SCORING_PACING is invalid")?
                .unwrap_or(PacingMode::Fixed),
            pacing_delay: Duration::from_millis(parse_env("SCORING_PACING_MS", 1000)?),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

/// Like `parse_env`, but zero is a startup error.
fn parse_nonzero_env(key: &str, default: u64) -> Result<u64> {
    let value = parse_env(key, default)?;
    if value == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}
