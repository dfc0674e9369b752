use axum::http::{HeaderMap, header};

pub const SESSION_COOKIE: &str = "session_token";

/// Non-empty value of cookie `name`, searched across every `Cookie` header.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.trim().to_string())
        })
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("lang=en; session_token=tok"),
        );
        assert_eq!(read_cookie(&headers, SESSION_COOKIE).as_deref(), Some("tok"));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_token="));
        assert!(read_cookie(&headers, SESSION_COOKIE).is_none());
    }
}
