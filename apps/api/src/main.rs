mod config;
mod errors;
mod hero;
mod llm_client;
mod routes;
mod sessions;
mod state;
mod strategy;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::sessions::SessionRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Strategist API v{}", env!("CARGO_PKG_VERSION"));

    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY not set; sessions must supply their own key before generating");
    }

    // Initialize LLM client
    let llm = LlmClient::new()?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Sessions, with a background sweep for idle ones
    let sessions =
        SessionRegistry::with_idle_ttl(Duration::from_secs(config.session_idle_ttl_secs));
    let sweep_period = (sessions.idle_ttl() / 4).max(Duration::from_secs(1));
    tokio::spawn(sessions.clone().run_sweeper(sweep_period));
    info!(
        "Idle sessions expire after {}s (sweep every {}s)",
        config.session_idle_ttl_secs,
        sweep_period.as_secs()
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        config: config.clone(),
        sessions,
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
