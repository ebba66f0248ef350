/// Account endpoints
///
/// Signup and login answer with the user and set the `pb_session` cookie;
/// logout revokes the session and clears the cookie.
///
/// # Endpoints
///
/// - `POST /signup` - Register and log in
/// - `POST /login` - Log in
/// - `POST /logout` - Log out (works without a session)
/// - `GET /me` - Current user (authenticated)

use crate::{
    app::AppState,
    error::{ApiJson, ApiResult},
};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};
use projectboard_shared::auth::{
    account::{self, AuthSession},
    cookie::{clear_session_cookie, session_cookie, session_token_from_headers},
    middleware::CurrentUser,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Login name (at least 3 characters after trimming)
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password (checked against the password policy)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signup and login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: CurrentUser,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

fn session_response(state: &AppState, session: AuthSession) -> Response {
    let cookie = session_cookie(
        &session.token,
        session.expires_at,
        state.config.session.cookie_secure,
    );

    (
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse { user: session.user }),
    )
        .into_response()
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /signup
/// Content-Type: application/json
///
/// { "username": "ada", "password": "Analytical-Engine-1" }
/// ```
///
/// # Response
///
/// ```json
/// { "user": { "id": 1, "username": "ada" } }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Username too short, or password policy violations
///   (one `details` entry per violated rule)
/// - `409 Conflict`: Username already taken
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let session = account::signup(&state.db, &req.username, &req.password).await?;

    Ok(session_response(&state, session))
}

/// Log in
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown username or wrong password (same message)
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let session = account::login(&state.db, &req.username, &req.password).await?;

    Ok(session_response(&state, session))
}

/// Log out
///
/// Revokes the session named by the cookie, if any, and tells the browser to
/// drop the cookie. Always answers `{ "ok": true }`.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let token = session_token_from_headers(&headers);

    account::logout(&state.db, token.as_deref()).await?;

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(LogoutResponse { ok: true }),
    )
        .into_response())
}

/// Current user
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<CurrentUser> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_requires_fields() {
        let req = SignupRequest {
            username: String::new(),
            password: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_auth_response_shape() {
        let body = AuthResponse {
            user: CurrentUser {
                id: 4,
                username: "ada".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"user": {"id": 4, "username": "ada"}})
        );
    }
}
