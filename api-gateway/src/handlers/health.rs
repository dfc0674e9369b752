use auth_svc_api::HealthResponse;
use axum::Json;

/// GET /healthz
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
