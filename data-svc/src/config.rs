use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub wait_attempts: u32,
    pub wait_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_ok() {
            tracing::debug!("Loaded .env file");
        }

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url()),
            wait_attempts: parse_or("DB_WAIT_ATTEMPTS", 30),
            wait_interval: Duration::from_secs(parse_or("DB_WAIT_INTERVAL_SECS", 2)),
        }
    }
}

/// Development URL built from the usual `POSTGRES_*` variables.
fn default_database_url() -> String {
    let user = env::var("POSTGRES_USER").unwrap_or_else(|_| "diabrisk".to_string());
    let password =
        env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "diabrisk_dev_password".to_string());
    let host = env::var("DB_HOST").unwrap_or_else(|_| "postgres".to_string());
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let database = env::var("POSTGRES_DB").unwrap_or_else(|_| "diabrisk".to_string());

    format!("postgres://{user}:{password}@{host}:{port}/{database}?sslmode=disable")
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Hides credentials in database URLs before they reach the logs.
pub fn mask_credentials(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@')
        && let Some(scheme_end) = url.find("://")
        && scheme_end < at_pos
    {
        return format!("{}***:***{}", &url[..scheme_end + 3], &url[at_pos..]);
    }
    url.to_string()
}
