pub mod rules;

use std::time::Duration;

use serde_json::{Map, Value};

use crate::config::{GatewayConfig, PredictionMode};
use crate::error::GatewayError;

/// Where `/api/risk` scores come from.
#[derive(Clone)]
pub enum PredictionBackend {
    /// Model service reached over HTTP.
    Remote { client: reqwest::Client, url: String },
    RuleBased,
}

impl PredictionBackend {
    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        Ok(match config.prediction_mode {
            PredictionMode::Remote => Self::Remote {
                client: reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.prediction_timeout_secs))
                    .build()?,
                url: config.prediction_url.clone(),
            },
            PredictionMode::RuleBased => Self::RuleBased,
        })
    }

    /// Scores `payload`. The remote answer is relayed as long as it is a
    /// JSON object, whatever the upstream status.
    pub async fn predict(&self, payload: &Map<String, Value>) -> Result<Value, GatewayError> {
        match self {
            Self::Remote { client, url } => forward(client, url, payload).await,
            Self::RuleBased => {
                let assessment = rules::assess(payload)?;
                serde_json::to_value(assessment).map_err(|e| GatewayError::Internal(e.to_string()))
            }
        }
    }
}

async fn forward(
    client: &reqwest::Client,
    url: &str,
    payload: &Map<String, Value>,
) -> Result<Value, GatewayError> {
    let response = client
        .post(url)
        .json(payload)
        .send()
        .await
        .map_err(|e| GatewayError::PredictionUnavailable(e.to_string()))?;

    let status = response.status();
    let body = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            GatewayError::PredictionUnavailable(e.to_string())
        } else {
            GatewayError::PredictionMalformed(e.to_string())
        }
    })?;

    match serde_json::from_slice::<Value>(&body) {
        Ok(value @ Value::Object(_)) => {
            if !status.is_success() {
                tracing::warn!(%status, "Prediction service answered with an error status");
            }
            Ok(value)
        }
        Ok(_) => Err(GatewayError::PredictionMalformed(format!(
            "{status}: body is not a JSON object"
        ))),
        Err(e) => Err(GatewayError::PredictionMalformed(format!("{status}: {e}"))),
    }
}
