use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
///
/// Nothing is strictly required: without `GOOGLE_API_KEY` the service runs in
/// fallback-only mode and every resume is synthesized offline.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub llm_timeout_secs: u64,
    pub llm_retry_delay_ms: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: optional_env("GOOGLE_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout_secs: parse_value("LLM_TIMEOUT_SECS", optional_env("LLM_TIMEOUT_SECS"), 60)?,
            llm_retry_delay_ms: parse_value(
                "LLM_RETRY_DELAY_MS",
                optional_env("LLM_RETRY_DELAY_MS"),
                1000,
            )?,
            max_upload_bytes: parse_value(
                "MAX_UPLOAD_BYTES",
                optional_env("MAX_UPLOAD_BYTES"),
                5 * 1024 * 1024,
            )?,
            port: parse_value("PORT", optional_env("PORT"), 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Reads an env var, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_value<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {value}")),
        None => Ok(default),
    }
}
