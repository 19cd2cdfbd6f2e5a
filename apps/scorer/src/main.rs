use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_scorer::config::{Config, FINETUNED_API_KEY_VAR};
use resume_scorer::llm_client::LlmClient;
use resume_scorer::routes::build_router;
use resume_scorer::scoring::pacing::build_rate_limiter;
use resume_scorer::scoring::{ScoringContext, TextualScorer};
use resume_scorer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume scorer v{}", env!("CARGO_PKG_VERSION"));

    let query_model = build_llm_client(&config, config.api_key.clone(), &config.llm_model)?;
    info!("Query model initialized (model: {})", query_model.model());

    let textual = match &config.finetuned_api_key {
        Some(key) => {
            let client = build_llm_client(&config, key.clone(), &config.finetuned_model)?;
            info!("Textual scoring model initialized (model: {})", client.model());
            TextualScorer::new(Arc::new(client))
        }
        None => {
            warn!("{FINETUNED_API_KEY_VAR} is not set; textual scores will be 0");
            TextualScorer::without_credential()
        }
    };

    let scoring = ScoringContext::new(
        build_rate_limiter(config.pacing, config.pacing_delay),
        config.call_timeout,
    );
    info!(
        "Pacing: {:?} {}ms, call timeout {}s",
        config.pacing,
        config.pacing_delay.as_millis(),
        config.call_timeout.as_secs()
    );

    let state = AppState {
        query_model: Arc::new(query_model),
        textual: Arc::new(textual),
        scoring,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_llm_client(config: &Config, api_key: String, model: &str) -> Result<LlmClient> {
    Ok(LlmClient::new(api_key, model.to_string(), config.call_timeout)
        .context("Failed to build HTTP client")?
        .with_api_url(config.llm_api_url.clone())
        .with_max_attempts(config.llm_max_attempts))
}
