use auth_svc_api::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    // === Session ===
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Invalid session")]
    InvalidSession,

    // === Request validation ===
    /// Carries the parse error, which is returned to the client as is.
    #[error("{0}")]
    InvalidBody(String),
    #[error("Feature '{0}' must be a number")]
    InvalidFeature(String),

    // === Upstreams ===
    #[error("Prediction service unavailable: {0}")]
    PredictionUnavailable(String),
    #[error("Prediction service returned an invalid body: {0}")]
    PredictionMalformed(String),
    #[error("Auth service unavailable: {0}")]
    AuthServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    fn get_error_info(&self) -> (StatusCode, String, Option<String>) {
        match self {
            GatewayError::NotAuthenticated | GatewayError::InvalidSession => {
                (StatusCode::UNAUTHORIZED, self.to_string(), None)
            }
            GatewayError::InvalidBody(_) | GatewayError::InvalidFeature(_) => {
                (StatusCode::BAD_REQUEST, self.to_string(), None)
            }
            GatewayError::PredictionUnavailable(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to connect to ML service".to_string(),
                Some(detail.clone()),
            ),
            GatewayError::PredictionMalformed(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to parse ML service response".to_string(),
                Some(detail.clone()),
            ),
            GatewayError::AuthServiceUnavailable(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to reach auth service".to_string(),
                Some(detail.clone()),
            ),
            GatewayError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
                Some(detail.clone()),
            ),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message, internal_detail) = self.get_error_info();

        if let Some(ref detail) = internal_detail {
            tracing::error!(%status, detail, "{message}");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
