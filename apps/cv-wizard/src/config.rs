use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_URL;

/// Workly data API endpoint for candidate records.
const DEFAULT_PREFILL_BASE_URL: &str = "https://workly-app.bubbleapps.io/api/1.1/obj/candidate";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub prefill_base_url: String,
    /// HTML→PDF converter command line. HTML export when unset.
    pub export_command: Option<String>,
    /// Idle time after which a wizard session is discarded.
    pub session_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            prefill_base_url: std::env::var("PREFILL_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PREFILL_BASE_URL.to_string()),
            export_command: std::env::var("EXPORT_COMMAND")
                .ok()
                .filter(|c| !c.trim().is_empty()),
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "7200".to_string())
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
