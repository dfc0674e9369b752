// src/handlers/auth.rs

use auth_svc_api::{MessageResponse, UserResponse};
use axum::extract::{Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::cookies::{
    OAUTH_STATE_COOKIE, OAUTH_STATE_MAX_AGE_SECS, SESSION_COOKIE, build_cookie, clear_cookie,
};
use crate::auth::extractors::{OAuthStateCookie, SessionCookie};
use crate::auth::services::verify_state;
use crate::auth::token::generate_oauth_state;
use crate::error::AppError;
use crate::response::AppResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
    /// Set by Google when the user denies consent.
    pub error: Option<String>,
}

/// GET /auth/google/login
/// Starts the OAuth flow: stores a fresh `state` nonce and redirects to Google.
pub async fn google_login(State(state): State<AppState>) -> Result<AppResponse<()>, AppError> {
    let oauth_state = generate_oauth_state();
    let url = state.auth_service.authorization_url(&oauth_state);

    AppResponse::redirect(&url)?.with_cookie(&build_cookie(
        OAUTH_STATE_COOKIE,
        &oauth_state,
        OAUTH_STATE_MAX_AGE_SECS,
        state.cookie_secure(),
    ))
}

/// Appends a clearing `Set-Cookie` for `name` to an already built response.
fn clearing(mut response: Response, name: &str, secure: bool) -> Result<Response, AppError> {
    let value = HeaderValue::from_str(&clear_cookie(name, secure))
        .map_err(|_| AppError::internal("Failed to set cookie"))?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(response)
}

/// GET /auth/google/callback
/// Once the state matches, the nonce is spent: every later outcome clears it.
pub async fn google_callback(
    State(state): State<AppState>,
    OAuthStateCookie(expected_state): OAuthStateCookie,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    verify_state(params.state.as_deref(), expected_state.as_deref()).inspect_err(|_| {
        tracing::warn!("OAuth callback rejected: state mismatch");
    })?;

    if let Some(reason) = params.error.as_deref() {
        tracing::warn!(reason, "Google returned an error to the callback");
    }

    let secure = state.cookie_secure();
    let code = params.code.unwrap_or_default();
    let (user, session) = match state.auth_service.complete_login(&code).await {
        Ok(login) => login,
        Err(err) => return clearing(err.into_response(), OAUTH_STATE_COOKIE, secure),
    };

    tracing::info!(user_id = %user.id, email = %user.email, "User logged in");

    Ok(AppResponse::redirect("/")?
        .with_cookie(&clear_cookie(OAUTH_STATE_COOKIE, secure))?
        .with_cookie(&build_cookie(
            SESSION_COOKIE,
            &session.token,
            session.max_age_secs(Utc::now()),
            secure,
        ))?
        .into_response())
}

/// POST /auth/logout
/// Always succeeds; revocation failures are only logged.
pub async fn logout(
    State(state): State<AppState>,
    SessionCookie(token): SessionCookie,
) -> Result<AppResponse<MessageResponse>, AppError> {
    let Some(token) = token else {
        return Ok(AppResponse::ok(MessageResponse::new("Already logged out")));
    };

    state.auth_service.logout(&token);

    AppResponse::ok(MessageResponse::new("Logged out successfully"))
        .with_cookie(&clear_cookie(SESSION_COOKIE, state.cookie_secure()))
}

/// GET /auth/session
/// Returns the user owning the session cookie.
pub async fn get_session(
    State(state): State<AppState>,
    SessionCookie(token): SessionCookie,
) -> Result<Response, AppError> {
    let token = token.ok_or(AppError::NotAuthenticated)?;

    match state.auth_service.validate_session(&token) {
        Ok(user) => Ok(AppResponse::ok(UserResponse::from(user)).into_response()),
        Err(AppError::InvalidSession) => clearing(
            AppError::InvalidSession.into_response(),
            SESSION_COOKIE,
            state.cookie_secure(),
        ),
        Err(err) => Err(err),
    }
}
