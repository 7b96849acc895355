mod agent;
mod config;
mod errors;
mod llm_client;
mod routes;
mod screenplay;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agent::ScreenplayAgent;
use crate::config::{AgentConfig, Config};
use crate::routes::build_router;
use crate::state::AppState;

/// Screenplay writing agent: turns a story idea into a formatted screenplay.
#[derive(Parser, Debug)]
#[command(name = "screenwriter", version, about)]
struct Cli {
    /// OpenAI API key (overrides OPENAI_API_KEY)
    #[arg(long)]
    openai_api_key: Option<String>,

    /// OpenRouter API key (overrides OPENROUTER_API_KEY)
    #[arg(long)]
    openrouter_api_key: Option<String>,

    /// Model ID used through OpenRouter (overrides MODEL_NAME)
    #[arg(long)]
    model: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(key) = self.openai_api_key {
            config.openai_api_key = Some(key);
        }
        if let Some(key) = self.openrouter_api_key {
            config.openrouter_api_key = Some(key);
        }
        if let Some(model) = self.model {
            config.model_name = model;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    cli.apply(&mut config);

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screenwriter v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Agent: {} v{} ({})",
        config.agent.name, config.agent.version, config.agent.description
    );

    // Generation backend is built on the first request, not here.
    let agent = Arc::new(ScreenplayAgent::new(config.credentials()));

    let cors = cors_layer(&config.agent);
    let state = AppState {
        config: config.clone(),
        agent: agent.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    agent.cleanup();
    info!("Stopped");

    Ok(())
}

/// Permissive when the manifest lists `*`, otherwise restricted to the listed origins.
fn cors_layer(agent: &AgentConfig) -> CorsLayer {
    if agent.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = agent
        .deployment
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
