use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::middleware::session::SessionUser;
use crate::state::AppState;

/// POST /api/risk
/// Body must be a JSON object; it is scored by the configured backend.
pub async fn assess_risk(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, GatewayError> {
    let Json(payload) = payload.map_err(|e| GatewayError::InvalidBody(e.body_text()))?;

    if let Some(user) = &session.user {
        tracing::info!(user_id = %user.id, "Risk assessment requested");
    }

    state.prediction.predict(&payload).await.map(Json)
}
