mod config;
mod db;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, mask_credentials};

pub fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,data_svc=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Waits for `signal`; a listener that fails to register never resolves.
async fn listen<E: std::fmt::Display>(
    signal: impl Future<Output = Result<(), E>>,
    name: &str,
) {
    if let Err(e) = signal.await {
        tracing::error!("Failed to listen for {name}: {e}");
        std::future::pending::<()>().await;
    }
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = listen(tokio::signal::ctrl_c(), "ctrl-c");

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    tracing::info!("Starting data-svc...");

    let config = Config::from_env();
    tracing::info!("Database URL: {}", mask_credentials(&config.database_url));

    let mut conn =
        db::wait_for_db(&config.database_url, config.wait_attempts, config.wait_interval).await?;
    db::run_migrations(&mut conn)?;
    db::verify_schema(&mut conn)?;
    drop(conn);

    tracing::info!("✅ data-svc initialized successfully!");
    tracing::info!("Database ready with all tables and seed data");

    shutdown_signal().await;
    tracing::info!("Shutting down data-svc");

    Ok(())
}
