//! Session check for `/api/*`: every request is validated against the auth
//! service, so a revoked session is refused immediately.

use auth_svc_api::UserResponse;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::cookies::{SESSION_COOKIE, read_cookie};
use crate::error::GatewayError;
use crate::state::AppState;

/// Inserted into request extensions once the session is accepted.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// `None` when the auth service answered 200 with an unexpected body.
    pub user: Option<UserResponse>,
}

pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let token =
        read_cookie(request.headers(), SESSION_COOKIE).ok_or(GatewayError::NotAuthenticated)?;

    let response = state
        .session_client
        .get(state.auth_url("/auth/session"))
        .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("Session check failed: {e}");
            GatewayError::InvalidSession
        })?;

    if response.status() != StatusCode::OK {
        tracing::debug!(status = %response.status(), "Session rejected by auth service");
        return Err(GatewayError::InvalidSession);
    }

    let user = response.json::<UserResponse>().await.ok();
    if let Some(ref user) = user {
        tracing::debug!(user_id = %user.id, "Session accepted");
    }

    request.extensions_mut().insert(SessionUser { user });
    Ok(next.run(request).await)
}
