mod app;
mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod response;
mod state;
#[cfg(test)]
mod testing;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::build_router;
use auth::oauth::GoogleOAuthClient;
use auth::services::AuthService;
use config::Config;
use db::connection::create_pool;
use db::repositories::{SessionRepository, UserRepository};
use state::AppState;

pub fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Defaults when RUST_LOG is not set
        tracing_subscriber::EnvFilter::new("info,auth_svc=debug,hyper_util=warn,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// ----------------- Main -----------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    tracing::info!("Starting auth-svc...");

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url, config.db_pool_size)?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.oauth_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;
    let provider = GoogleOAuthClient::new(config.google.clone(), http);

    let auth_service = AuthService::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(SessionRepository::new(pool)),
        Arc::new(provider),
    );

    let addr = config.bind_address();
    let app = build_router(AppState::new(config, auth_service));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("🚀 Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
