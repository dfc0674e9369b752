use anyhow::Result;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Reads `APP_ENV`; anything other than `production`/`prod` is development.
    pub fn detect() -> Self {
        Self::from_app_env(env::var("APP_ENV").ok().as_deref())
    }

    fn from_app_env(value: Option<&str>) -> Self {
        match value {
            Some("production" | "prod") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub google: GoogleOAuthConfig,
    pub server_host: String,
    pub server_port: u16,
    pub db_pool_size: u32,
    pub oauth_timeout_secs: u64,
}

impl Config {
    /// Loads the configuration from environment variables, reading `.env`
    /// first when running in development.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::detect();

        tracing::info!(
            "🌍 Environment detected: {}",
            environment.as_str().to_uppercase()
        );

        Self::load_env_file(environment);

        let database_url = Self::get_database_url(environment)?;
        let google = GoogleOAuthConfig {
            client_id: Self::get_required("GOOGLE_CLIENT_ID", environment)?,
            client_secret: Self::get_required("GOOGLE_CLIENT_SECRET", environment)?,
            redirect_url: env::var("REDIRECT_URL")
                .unwrap_or_else(|_| "http://diabrisk.local/auth/google/callback".to_string()),
        };
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = parse_or(env::var("PORT").ok(), 8081);
        let db_pool_size = parse_or(env::var("DB_POOL_SIZE").ok(), 5);
        let oauth_timeout_secs = parse_or(env::var("OAUTH_TIMEOUT_SECS").ok(), 10);

        tracing::info!("✅ Configuration loaded successfully");
        tracing::debug!("   Database: {}", mask_credentials(&database_url));
        tracing::debug!("   Redirect URL: {}", google.redirect_url);
        tracing::debug!("   Server: {}:{}", server_host, server_port);

        Ok(Self {
            environment,
            database_url,
            google,
            server_host,
            server_port,
            db_pool_size,
            oauth_timeout_secs,
        })
    }

    fn load_env_file(environment: Environment) {
        if environment.is_production() {
            tracing::info!("📦 Production mode: using injected environment variables");
            return;
        }

        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("   Loaded: {}", path.display()),
            Err(_) => tracing::warn!("   .env file not found, using environment variables"),
        }
    }

    /// `DATABASE_URL`, or in development an URL assembled from the usual
    /// `POSTGRES_*` variables.
    fn get_database_url(environment: Environment) -> Result<String> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(url);
        }

        if environment.is_production() {
            anyhow::bail!("DATABASE_URL must be set in production!");
        }

        let user = env::var("POSTGRES_USER").unwrap_or_else(|_| "diabrisk".to_string());
        let password =
            env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "diabrisk_dev_password".to_string());
        let host = env::var("DB_HOST").unwrap_or_else(|_| "postgres".to_string());
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let database = env::var("POSTGRES_DB").unwrap_or_else(|_| "diabrisk".to_string());

        Ok(format!(
            "postgres://{user}:{password}@{host}:{port}/{database}?sslmode=disable"
        ))
    }

    fn get_required(key: &str, environment: Environment) -> Result<String> {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ if environment.is_production() => {
                tracing::error!("❌ {key} not set in production!");
                anyhow::bail!("{key} is required in production");
            }
            _ => {
                tracing::warn!("⚠️  {key} not set, Google sign-in will fail (DEVELOPMENT ONLY!)");
                Ok(String::new())
            }
        }
    }

    /// Cookies carry `Secure` only in production, where traffic is HTTPS.
    pub fn cookie_secure(&self) -> bool {
        self.environment.is_production()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Hides credentials in database URLs before they reach the logs.
pub fn mask_credentials(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@')
        && let Some(scheme_end) = url.find("://")
        && scheme_end < at_pos
    {
        let scheme = &url[..scheme_end + 3];
        let after_at = &url[at_pos..];
        return format!("{scheme}***:***{after_at}");
    }
    url.to_string()
}
