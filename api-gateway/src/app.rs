use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::health::health;
use crate::handlers::proxy::proxy_to_auth;
use crate::handlers::risk::assess_risk;
use crate::middleware::session::require_session;
use crate::state::AppState;

/// `/auth/*` routes, forwarded as they are to the auth service.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/google/login", get(proxy_to_auth))
        .route("/google/callback", get(proxy_to_auth))
        .route("/logout", post(proxy_to_auth))
        .route("/session", get(proxy_to_auth))
}

/// `/api/*` routes, all behind the session check.
fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/risk", post(assess_risk))
        .route_layer(from_fn_with_state(state.clone(), require_session))
}

pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/healthz", get(health))
        .nest("/auth", auth_routes())
        .nest("/api", api_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Invalid origins are skipped with a warning.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse()
                .inspect_err(|e| tracing::warn!("Ignoring invalid CORS origin '{origin}': {e}"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60))
}
