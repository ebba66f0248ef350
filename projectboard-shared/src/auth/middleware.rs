/// Session guard for Axum
///
/// Resolves the session cookie of a request to the authenticated user. The
/// API server runs [`require_user`] as a middleware layer in front of every
/// protected route and inserts the resulting [`CurrentUser`] into request
/// extensions; handlers read it with Axum's `Extension` extractor.
///
/// This is the only authorization boundary. Ownership of individual projects,
/// tasks and notes is checked by [`super::authorization`] against
/// `CurrentUser::id`.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use projectboard_shared::auth::middleware::CurrentUser;
///
/// async fn handler(Extension(user): Extension<CurrentUser>) -> String {
///     format!("Hello, {}!", user.username)
/// }
/// ```

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::{cookie::session_token_from_headers, session::resolve_session};
use crate::error::{ServiceError, ServiceResult};
use crate::models::user::User;

/// Authenticated user attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID
    pub id: i64,

    /// Login name
    pub username: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Resolves a session token to its user
///
/// # Errors
///
/// Returns `ServiceError::Unauthorized` when the token is missing, unknown or
/// expired (an expired session is deleted as a side effect).
pub async fn require_user(pool: &SqlitePool, token: Option<&str>) -> ServiceResult<CurrentUser> {
    let token = token.ok_or_else(|| ServiceError::Unauthorized("Unauthorized".to_string()))?;

    let mut conn = pool.acquire().await?;

    resolve_session(&mut conn, token)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized("Unauthorized".to_string()))
}

/// Reads the session cookie from `headers` and resolves it
pub async fn require_user_from_headers(
    pool: &SqlitePool,
    headers: &HeaderMap,
) -> ServiceResult<CurrentUser> {
    let token = session_token_from_headers(headers);
    require_user(pool, token.as_deref()).await
}
