mod app;
mod config;
mod cookies;
mod error;
mod handlers;
mod middleware;
mod prediction;
mod state;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::build_router;
use config::GatewayConfig;
use state::AppState;

pub fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,api_gateway=debug,hyper_util=warn,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    tracing::info!("Starting api-gateway...");

    let config = GatewayConfig::from_env()?;
    let addr = config.bind_address();
    let app = build_router(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("🚀 Gateway running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
