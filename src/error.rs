// src/error.rs

use auth_svc_api::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::auth::oauth::OAuthError;
use crate::db::error::RepositoryError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    // === Authentication ===
    #[error("Invalid state parameter")]
    InvalidState,
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Invalid or expired session")]
    InvalidSession,

    // === Identity provider ===
    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),
    #[error("User info fetch failed: {0}")]
    UserInfoFailed(String),

    // === Login persistence ===
    #[error("User resolution failed: {0}")]
    UserResolutionFailed(String),
    #[error("Session creation failed: {0}")]
    SessionCreationFailed(String),

    // === Internal ===
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, internal_detail) = self.get_error_info();

        if let Some(ref detail) = internal_detail {
            tracing::error!(%status, detail, "{message}");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl AppError {
    /// Status, public message and (for 5xx) the detail that is only logged.
    fn get_error_info(&self) -> (StatusCode, String, Option<String>) {
        match self {
            // 400 Bad Request
            AppError::InvalidState => (StatusCode::BAD_REQUEST, self.to_string(), None),

            // 401 Unauthorized
            AppError::NotAuthenticated | AppError::InvalidSession => {
                (StatusCode::UNAUTHORIZED, self.to_string(), None)
            }

            // 500 Internal Server Error
            AppError::TokenExchangeFailed(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to exchange token".to_string(),
                Some(detail.clone()),
            ),
            AppError::UserInfoFailed(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get user info".to_string(),
                Some(detail.clone()),
            ),
            AppError::UserResolutionFailed(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process user".to_string(),
                Some(detail.clone()),
            ),
            AppError::SessionCreationFailed(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create session".to_string(),
                Some(detail.clone()),
            ),
            AppError::DatabaseError(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred with the database".to_string(),
                Some(detail.clone()),
            ),
            AppError::InternalServerError(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
                Some(detail.clone()),
            ),
        }
    }

    // === Constructor helpers ===
    pub fn database(msg: impl Into<String>) -> Self {
        AppError::DatabaseError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::InternalServerError(msg.into())
    }

    #[cfg(test)]
    pub fn status_code(&self) -> StatusCode {
        self.get_error_info().0
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::database(err.to_string())
    }
}

impl From<OAuthError> for AppError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::ExchangeFailed(detail) => AppError::TokenExchangeFailed(detail),
            OAuthError::UserInfoFailed(detail) => AppError::UserInfoFailed(detail),
        }
    }
}
