// src/app.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::auth::{get_session, google_callback, google_login, logout};
use crate::handlers::health::health;
use crate::state::AppState;

/// `/auth/*` routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/google/login", get(google_login))
        .route("/google/callback", get(google_callback))
        .route("/logout", post(logout))
        .route("/session", get(get_session))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .nest("/auth", auth_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
