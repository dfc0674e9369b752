use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// Handler response carrying an optional JSON body and any number of
/// `Set-Cookie` headers.
///
/// # Examples
///
/// ```rust,ignore
/// // JSON body
/// AppResponse::ok(user)
///
/// // Redirect that also sets a cookie
/// AppResponse::redirect("/")?.with_cookie(&cookie)?
/// ```
#[derive(Debug)]
pub struct AppResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<T>,
}

impl<T> AppResponse<T>
where
    T: Serialize,
{
    pub fn new(status: StatusCode, body: T) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Some(body),
        }
    }

    /// 200 OK with data
    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Appends a `Set-Cookie` header; several cookies can be set on one response.
    pub fn with_cookie(mut self, cookie: &str) -> Result<Self, AppError> {
        let value = HeaderValue::from_str(cookie)
            .map_err(|_| AppError::internal("Failed to set cookie"))?;
        self.headers.append(header::SET_COOKIE, value);
        Ok(self)
    }
}

impl AppResponse<()> {
    /// 307 Temporary Redirect
    pub fn redirect(location: &str) -> Result<Self, AppError> {
        let value = HeaderValue::from_str(location)
            .map_err(|_| AppError::internal("Invalid redirect location"))?;
        let mut headers = HeaderMap::new();
        headers.insert(header::LOCATION, value);

        Ok(Self {
            status: StatusCode::TEMPORARY_REDIRECT,
            headers,
            body: None,
        })
    }
}

impl<T> IntoResponse for AppResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let mut response = match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        };

        response.headers_mut().extend(self.headers);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestData {
        message: String,
    }

    #[test]
    fn ok_response_has_200_status() {
        let response = AppResponse::ok(TestData {
            message: "success".to_string(),
        });
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.is_some());
    }

    #[test]
    fn redirect_sets_location() {
        let response = AppResponse::redirect("/").unwrap().into_response();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[test]
    fn multiple_cookies_are_all_kept() {
        let response = AppResponse::redirect("/")
            .unwrap()
            .with_cookie("a=1")
            .unwrap()
            .with_cookie("b=2")
            .unwrap()
            .into_response();

        let cookies: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cookies, vec!["a=1".to_string(), "b=2".to_string()]);
    }

    #[test]
    fn invalid_cookie_value_is_an_error() {
        let result = AppResponse::ok(()).with_cookie("bad\nvalue");
        assert!(result.is_err());
    }
}
