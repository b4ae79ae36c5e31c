//! The admin session cookie.
//!
//! The cookie's presence is the session marker checked by the admin gate;
//! its value is a session token from [`crate::auth::jwt`].

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;

pub const SESSION_COOKIE: &str = "admin_session";

/// Value of the cookie `name` from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// The session token from the cookie, falling back to a Bearer header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, SESSION_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session marker.
pub fn cleared_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let h = headers(&[("cookie", "theme=dark; admin_session=abc.def; lang=en")]);
        assert_eq!(read_cookie(&h, SESSION_COOKIE).as_deref(), Some("abc.def"));
        assert_eq!(read_cookie(&h, "missing"), None);
    }

    #[test]
    fn empty_cookie_counts_as_absent() {
        let h = headers(&[("cookie", "admin_session=")]);
        assert_eq!(read_cookie(&h, SESSION_COOKIE), None);
    }

    #[test]
    fn bearer_header_is_a_fallback() {
        let h = headers(&[("authorization", "Bearer tok")]);
        assert_eq!(session_token(&h).as_deref(), Some("tok"));

        let h = headers(&[("authorization", "Bearer tok"), ("cookie", "admin_session=c")]);
        assert_eq!(session_token(&h).as_deref(), Some("c"));
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie("tok", 3600, false);
        assert_eq!(
            cookie,
            "admin_session=tok; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600"
        );
        assert!(session_cookie("tok", 3600, true).ends_with("; Secure"));
        assert!(cleared_cookie(false).starts_with("admin_session=; "));
        assert!(cleared_cookie(false).contains("Max-Age=0"));
    }
}
