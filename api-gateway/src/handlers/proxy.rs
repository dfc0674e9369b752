use axum::body::{Body, to_bytes};
use axum::extract::{OriginalUri, Request, State};
use axum::http::{HeaderMap, HeaderName};
use axum::response::Response;

use crate::error::GatewayError;
use crate::state::AppState;

/// Largest request body forwarded to the auth service.
const MAX_PROXY_BODY_BYTES: usize = 1024 * 1024;

/// Headers that describe a single connection and must not be forwarded.
/// `Content-Length` is recomputed from the relayed body.
const SKIPPED_HEADERS: [&str; 10] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

fn is_skipped(name: &HeaderName) -> bool {
    SKIPPED_HEADERS.contains(&name.as_str())
}

fn copy_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from {
        if !is_skipped(name) {
            to.append(name.clone(), value.clone());
        }
    }
}

/// `/auth/*`
/// Forwards the request to the auth service and relays its answer untouched,
/// redirects and every `Set-Cookie` included.
///
/// The upstream path comes from [`OriginalUri`]: the nested router strips the
/// `/auth` prefix from the request URI.
pub async fn proxy_to_auth(
    State(state): State<AppState>,
    OriginalUri(original): OriginalUri,
    request: Request,
) -> Result<Response, GatewayError> {
    let (parts, body) = request.into_parts();
    let path_and_query = original
        .path_and_query()
        .map_or_else(|| original.path(), |pq| pq.as_str());
    let url = state.auth_url(path_and_query);

    let body = to_bytes(body, MAX_PROXY_BODY_BYTES)
        .await
        .map_err(|e| GatewayError::InvalidBody(e.to_string()))?;

    let mut headers = HeaderMap::new();
    copy_headers(&parts.headers, &mut headers);

    tracing::debug!(method = %parts.method, %url, "Proxying to auth service");

    let upstream = state
        .proxy_client
        .request(parts.method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|e| GatewayError::AuthServiceUnavailable(e.to_string()))?;

    let status = upstream.status();
    let upstream_headers = upstream.headers().clone();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| GatewayError::AuthServiceUnavailable(e.to_string()))?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    copy_headers(&upstream_headers, response.headers_mut());

    Ok(response)
}
