mod config;
mod errors;
mod extraction;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::SectionExtractor;
use crate::generation::ContentGenerator;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::scoring::KeywordAtsScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeForge API v{}", env!("CARGO_PKG_VERSION"));

    // Text service is optional; without it every resume comes from the fallback
    let service = build_text_service(&config)?;
    let generator = ContentGenerator::new(service)
        .with_retry_delay(Duration::from_millis(config.llm_retry_delay_ms));

    let extractor = Arc::new(SectionExtractor::new()?);

    let state = AppState {
        generator,
        scorer: Arc::new(KeywordAtsScorer),
        extractor,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once a web client is deployed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_text_service(config: &Config) -> Result<Option<Arc<dyn TextGenerator>>> {
    let Some(api_key) = config.google_api_key.clone() else {
        warn!("GOOGLE_API_KEY not set: running in fallback-only mode");
        return Ok(None);
    };

    let client = LlmClient::new(
        api_key,
        config.gemini_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", config.gemini_model);

    Ok(Some(Arc::new(client)))
}
