//! Google OAuth 2.0 authorization-code flow.
//!
//! The service only depends on [`IdentityProvider`]; `GoogleOAuthClient` is the
//! production implementation talking to Google's endpoints with `reqwest`.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::config::GoogleOAuthConfig;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
];

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("Token exchange failed: {0}")]
    ExchangeFailed(String),
    #[error("User info request failed: {0}")]
    UserInfoFailed(String),
}

/// Profile returned by the userinfo endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub verified_email: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is redirected to in order to start the flow.
    fn authorization_url(&self, state: &str) -> String;

    /// Trades an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError>;

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, OAuthError>;
}

pub struct GoogleOAuthClient {
    http: reqwest::Client,
    config: GoogleOAuthConfig,
}

impl GoogleOAuthClient {
    pub fn new(config: GoogleOAuthConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuthClient {
    fn authorization_url(&self, state: &str) -> String {
        let scope = SCOPES.join(" ");
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("state", state),
            ("access_type", "offline"),
        ];

        match Url::parse_with_params(GOOGLE_AUTH_URL, &params) {
            Ok(url) => url.into(),
            // GOOGLE_AUTH_URL is a valid constant
            Err(_) => GOOGLE_AUTH_URL.to_string(),
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let form = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&form)
            .send()
            .await
            .map_err(|e| OAuthError::ExchangeFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::ExchangeFailed(format!("{status}: {body}")));
        }

        response
            .json::<TokenResponse>()
            .await
            .map(|token| token.access_token)
            .map_err(|e| OAuthError::ExchangeFailed(e.to_string()))
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, OAuthError> {
        let response = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuthError::UserInfoFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::UserInfoFailed(format!(
                "userinfo endpoint returned {status}"
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| OAuthError::UserInfoFailed(e.to_string()))
    }
}
