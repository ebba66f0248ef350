/// Session cookie helpers
///
/// Builds `Set-Cookie` values for issuing and clearing the session cookie and
/// reads the session token back out of request `Cookie` headers.
///
/// The cookie is `HttpOnly`, `SameSite=Lax`, scoped to `/`, and lives as long
/// as the server-side session. `Secure` is added when the deployment says so.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};

use super::session::session_duration;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "pb_session";

/// Formats a timestamp as an HTTP date (RFC 1123, always GMT)
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `Set-Cookie` value that installs a session token
pub fn session_cookie(token: &str, expires_at: DateTime<Utc>, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Max-Age={}; Expires={}; SameSite=Lax; Path=/",
        SESSION_COOKIE,
        token,
        session_duration().num_seconds(),
        http_date(expires_at)
    );

    if secure {
        cookie.push_str("; Secure");
    }

    cookie
}

/// `Set-Cookie` value that removes the session cookie from the browser
pub fn clear_session_cookie() -> String {
    format!(
        "{}=\"\"; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/",
        SESSION_COOKIE
    )
}

/// Extracts the session token from the request's `Cookie` headers
///
/// Returns `None` when the cookie is missing or empty.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|token| !token.is_empty())
}
