use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::redirect::Policy;

use crate::config::GatewayConfig;
use crate::prediction::PredictionBackend;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    /// Session checks against the auth service.
    pub session_client: reqwest::Client,
    /// `/auth/*` forwarding; never follows redirects so the browser sees them.
    pub proxy_client: reqwest::Client,
    pub prediction: PredictionBackend,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        let session_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.session_check_timeout_secs))
            .build()
            .context("Failed to build session client")?;

        let proxy_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.proxy_timeout_secs))
            .redirect(Policy::none())
            .build()
            .context("Failed to build proxy client")?;

        let prediction =
            PredictionBackend::from_config(&config).context("Failed to build prediction client")?;

        Ok(Self {
            config: Arc::new(config),
            session_client,
            proxy_client,
            prediction,
        })
    }

    pub fn auth_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.config.auth_service_url, path_and_query)
    }
}
