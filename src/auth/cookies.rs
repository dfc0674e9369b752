use axum::http::{HeaderMap, header};

pub const SESSION_COOKIE: &str = "session_token";
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// Lifetime of the `oauth_state` cookie (10 minutes).
pub const OAUTH_STATE_MAX_AGE_SECS: i64 = 600;

/// Builds an HTTP-only `Set-Cookie` value scoped to `/`.
pub fn build_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that makes the browser drop `name`.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    build_cookie(name, "", 0, secure)
}

/// Reads a cookie from every `Cookie` header of the request.
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
    fn build_cookie_sets_http_only_and_path() {
        let cookie = build_cookie(SESSION_COOKIE, "tok", 604_800, false);
        assert_eq!(
            cookie,
            "session_token=tok; Path=/; Max-Age=604800; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn secure_flag_is_appended_in_production() {
        assert!(build_cookie(OAUTH_STATE_COOKIE, "s", 600, true).ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_cookie(SESSION_COOKIE, false);
        assert!(cookie.starts_with("session_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn read_cookie_finds_value_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; oauth_state=abc123; session_token=xyz"),
        );
        assert_eq!(read_cookie(&headers, OAUTH_STATE_COOKIE).as_deref(), Some("abc123"));
        assert_eq!(read_cookie(&headers, SESSION_COOKIE).as_deref(), Some("xyz"));
    }

    #[test]
    fn read_cookie_scans_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("session_token=tok"));
        assert_eq!(read_cookie(&headers, SESSION_COOKIE).as_deref(), Some("tok"));
    }

    #[test]
    fn read_cookie_ignores_missing_and_empty() {
        let mut headers = HeaderMap::new();
        assert!(read_cookie(&headers, SESSION_COOKIE).is_none());
        headers.insert(header::COOKIE, HeaderValue::from_static("session_token="));
        assert!(read_cookie(&headers, SESSION_COOKIE).is_none());
    }

    #[test]
    fn read_cookie_does_not_match_name_prefixes() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_token_old=zzz"));
        assert!(read_cookie(&headers, SESSION_COOKIE).is_none());
    }
}
