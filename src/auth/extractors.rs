use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::cookies::{OAUTH_STATE_COOKIE, SESSION_COOKIE, read_cookie};

/// Value of the `session_token` cookie, if the browser sent a non-empty one.
///
/// Never rejects: whether a missing cookie is an error depends on the route.
#[derive(Debug, Clone)]
pub struct SessionCookie(pub Option<String>);

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_cookie(&parts.headers, SESSION_COOKIE)))
    }
}

/// Value of the `oauth_state` cookie set by the login redirect.
#[derive(Debug, Clone)]
pub struct OAuthStateCookie(pub Option<String>);

impl<S> FromRequestParts<S> for OAuthStateCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_cookie(&parts.headers, OAUTH_STATE_COOKIE)))
    }
}
