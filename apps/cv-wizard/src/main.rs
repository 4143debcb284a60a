mod config;
mod errors;
mod export;
mod gateway;
mod llm_client;
mod models;
mod prefill;
mod render;
mod routes;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::{CommandPdfExporter, DocumentExporter, HtmlExporter};
use crate::gateway::GeminiEnhancer;
use crate::llm_client::GeminiClient;
use crate::prefill::BubblePrefill;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::store::SessionStore;

/// How often idle sessions are swept.
const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Workly CV wizard v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_api_url.clone())?;
    info!(
        "LLM client initialized (models: {}, {})",
        llm_client::FAST_MODEL,
        llm_client::PRO_MODEL
    );

    let prefill = BubblePrefill::new(config.prefill_base_url.clone())?;
    info!("Prefill source: {}", config.prefill_base_url);

    let exporter: Arc<dyn DocumentExporter> = match &config.export_command {
        Some(command) => {
            info!("PDF export via `{command}`");
            Arc::new(CommandPdfExporter::from_command_line(command)?)
        }
        None => {
            info!("EXPORT_COMMAND not set, exporting standalone HTML");
            Arc::new(HtmlExporter)
        }
    };

    // Session registry with idle eviction
    let sessions = SessionStore::default();
    let session_ttl = Duration::from_secs(config.session_ttl_secs);
    sessions.spawn_sweeper(session_ttl, SESSION_SWEEP_PERIOD);
    info!("Idle sessions expire after {}s", config.session_ttl_secs);

    // Build app state
    let state = AppState {
        sessions,
        enhancer: Arc::new(GeminiEnhancer::new(llm)),
        prefill: Arc::new(prefill),
        exporter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
