//! Review Sentiment Service, binary entrypoint.
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use review_sentiment_service::api::{self, AppState};
use review_sentiment_service::config::ServerConfig;
use review_sentiment_service::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let metrics = Metrics::init();
    let config = ServerConfig::from_env();

    // The analyzer stays unbuilt until the first /analyze-sentiment request;
    // startup and /health never pay for model construction.
    let state = AppState::from_env();
    let app = api::create_router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("binding {}:{}", config.host, config.port))?;
    info!(host = %config.host, port = config.port, "review sentiment service listening");

    axum::serve(listener, app).await?;
    Ok(())
}
