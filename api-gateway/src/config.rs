use std::env;
use std::str::FromStr;

use anyhow::Result;

/// How `/api/risk` obtains a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionMode {
    /// Forward the payload to the model service.
    Remote,
    /// Score locally with fixed thresholds.
    RuleBased,
}

impl FromStr for PredictionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "rule_based" | "rules" => Ok(Self::RuleBased),
            other => anyhow::bail!("Unknown PREDICTION_MODE '{other}' (expected remote or rule_based)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub auth_service_url: String,
    pub prediction_url: String,
    pub prediction_mode: PredictionMode,
    pub session_check_timeout_secs: u64,
    pub proxy_timeout_secs: u64,
    pub prediction_timeout_secs: u64,
    pub cors_origins: Vec<String>,
    pub server_host: String,
    pub server_port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            auth_service_url: "http://auth-svc:8081".to_string(),
            prediction_url: "http://65.109.169.137:8000/predict".to_string(),
            prediction_mode: PredictionMode::Remote,
            session_check_timeout_secs: 5,
            proxy_timeout_secs: 10,
            prediction_timeout_secs: 10,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://diabrisk.local".to_string(),
            ],
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
        }
    }
}

impl GatewayConfig {
    /// Reads the gateway settings; unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        if dotenvy::dotenv().is_ok() {
            tracing::debug!("Loaded .env file");
        }

        let defaults = Self::default();

        let prediction_mode = match non_empty("PREDICTION_MODE") {
            Some(mode) => mode.parse()?,
            None => defaults.prediction_mode,
        };

        let config = Self {
            auth_service_url: non_empty("AUTH_SERVICE_URL")
                .map_or(defaults.auth_service_url, |url| url.trim_end_matches('/').to_string()),
            prediction_url: non_empty("PREDICTION_URL").unwrap_or(defaults.prediction_url),
            prediction_mode,
            session_check_timeout_secs: parse_or(
                "SESSION_CHECK_TIMEOUT_SECS",
                defaults.session_check_timeout_secs,
            ),
            proxy_timeout_secs: parse_or("PROXY_TIMEOUT_SECS", defaults.proxy_timeout_secs),
            prediction_timeout_secs: parse_or(
                "PREDICTION_TIMEOUT_SECS",
                defaults.prediction_timeout_secs,
            ),
            cors_origins: non_empty("CORS_ORIGINS")
                .map_or(defaults.cors_origins, |raw| split_origins(&raw)),
            server_host: non_empty("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or("PORT", defaults.server_port),
        };

        tracing::info!(
            auth_service = %config.auth_service_url,
            mode = ?config.prediction_mode,
            "✅ Gateway configuration loaded"
        );

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    non_empty(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_mode_parses_known_values() {
        assert_eq!("remote".parse::<PredictionMode>().unwrap(), PredictionMode::Remote);
        assert_eq!(
            "RULE_BASED".parse::<PredictionMode>().unwrap(),
            PredictionMode::RuleBased
        );
        assert!("magic".parse::<PredictionMode>().is_err());
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            split_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn defaults_match_deployment() {
        let config = GatewayConfig::default();
        assert_eq!(config.auth_service_url, "http://auth-svc:8081");
        assert_eq!(config.session_check_timeout_secs, 5);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}
