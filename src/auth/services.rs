// src/auth/services.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::auth::oauth::{GoogleUserInfo, IdentityProvider};
use crate::auth::token::{generate_session_token, hash_token};
use crate::db::models::auth_session::NewAuthSession;
use crate::db::models::user::{DEFAULT_ROLE, NewUser, User};
use crate::db::repositories::{SessionStore, UserStore};
use crate::error::AppError;

/// Sessions live for seven days; activity does not extend them.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Raw token handed to the browser exactly once.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedSession {
    /// Seconds until expiry, used as the cookie's `Max-Age`.
    pub fn max_age_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// The `state` echoed by Google must equal the one stored in the cookie;
/// both must be present and non-empty.
pub fn verify_state(query_state: Option<&str>, cookie_state: Option<&str>) -> Result<(), AppError> {
    match (query_state, cookie_state) {
        (Some(received), Some(expected)) if !expected.is_empty() && received == expected => Ok(()),
        _ => Err(AppError::InvalidState),
    }
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    provider: Arc<dyn IdentityProvider>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            users,
            sessions,
            provider,
        }
    }

    pub fn authorization_url(&self, state: &str) -> String {
        self.provider.authorization_url(state)
    }

    /// Callback half of the OAuth flow, run once the `state` check passed:
    /// code exchange, profile fetch, user upsert, session issuance.
    ///
    /// The upsert and the session insert are separate statements; a failure
    /// between them leaves a user without a session, which the next login
    /// picks up again by `google_id`.
    pub async fn complete_login(&self, code: &str) -> Result<(User, IssuedSession), AppError> {
        if code.is_empty() {
            return Err(AppError::TokenExchangeFailed(
                "missing authorization code".to_string(),
            ));
        }

        let access_token = self.provider.exchange_code(code).await?;
        let profile = self.provider.fetch_user_info(&access_token).await?;

        let user = self.find_or_create_user(&profile)?;
        let session = self.create_session(user.id)?;

        tracing::info!(user_id = %user.id, "Session issued");
        Ok((user, session))
    }

    /// Looks the user up by Google id; creates it on first login.
    pub fn find_or_create_user(&self, profile: &GoogleUserInfo) -> Result<User, AppError> {
        let now = Utc::now();

        let existing = self
            .users
            .find_by_google_id(&profile.id)
            .map_err(|e| AppError::UserResolutionFailed(e.to_string()))?;

        if let Some(user) = existing {
            // Best effort: a stale last_login_at must not block the login.
            self.users
                .update_last_login(user.id, now)
                .inspect_err(|e| {
                    tracing::warn!(user_id = %user.id, "Failed to update last login: {e}");
                })
                .ok();
            return Ok(user);
        }

        tracing::info!(
            email = %profile.email,
            verified = profile.verified_email,
            "Creating new user"
        );

        let new_user = NewUser {
            email: profile.email.clone(),
            google_id: Some(profile.id.clone()),
            full_name: profile.name.clone(),
            picture_url: profile.picture.clone(),
            role: DEFAULT_ROLE.to_string(),
            last_login_at: Some(now),
        };

        self.users
            .create(&new_user)
            .map_err(|e| AppError::UserResolutionFailed(e.to_string()))
    }

    /// Persists the hash of a fresh token and returns the raw token.
    pub fn create_session(&self, user_id: Uuid) -> Result<IssuedSession, AppError> {
        let now = Utc::now();
        let token = generate_session_token();

        let new_session = NewAuthSession {
            id: Uuid::new_v4(),
            user_id,
            token_hash: hash_token(&token),
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
            last_activity: now,
        };

        let created = self
            .sessions
            .create(&new_session)
            .map_err(|e| AppError::SessionCreationFailed(e.to_string()))?;

        Ok(IssuedSession {
            token,
            expires_at: created.expires_at,
        })
    }

    /// Returns the owner of an active session, or `InvalidSession` for an
    /// unknown, expired or revoked token.
    pub fn validate_session(&self, token: &str) -> Result<User, AppError> {
        let now = Utc::now();
        let token_hash = hash_token(token);

        let user = self
            .sessions
            .find_active_user(&token_hash, now)?
            .ok_or(AppError::InvalidSession)?;

        self.sessions
            .touch(&token_hash, now)
            .inspect_err(|e| tracing::warn!(user_id = %user.id, "Failed to touch session: {e}"))
            .ok();

        Ok(user)
    }

    /// Revokes the session behind `token`. Unknown tokens and storage
    /// failures are logged, never returned: logout always succeeds.
    pub fn logout(&self, token: &str) {
        match self.sessions.revoke(&hash_token(token)) {
            Ok(0) => tracing::debug!("Logout for unknown session"),
            Ok(_) => tracing::info!("Session revoked"),
            Err(e) => tracing::error!("Failed to revoke session: {e}"),
        }
    }
}
