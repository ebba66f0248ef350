/// Session manager
///
/// Sessions are opaque random tokens stored server-side with an expiry. The
/// token travels in the `pb_session` cookie; nothing about the user is
/// encoded in it.
///
/// # Lifecycle
///
/// - **Create**: at login or signup, valid for [`SESSION_DAYS`] days
/// - **Resolve**: joins to the owning user; an expired row is deleted on the
///   spot and treated as absent (no background sweep)
/// - **Revoke**: at logout; unknown tokens are ignored
///
/// # Example
///
/// ```no_run
/// use projectboard_shared::auth::session::{create_session, resolve_session, revoke_session};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
/// let mut conn = pool.acquire().await?;
///
/// let (token, _expires_at) = create_session(&mut conn, user_id).await?;
/// assert!(resolve_session(&mut conn, &token).await?.is_some());
///
/// revoke_session(&mut conn, &token).await?;
/// assert!(resolve_session(&mut conn, &token).await?.is_none());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

use super::middleware::CurrentUser;
use crate::models::session::Session;

/// Random bytes per token (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// Session lifetime in days
pub const SESSION_DAYS: i64 = 7;

/// Session lifetime
pub fn session_duration() -> Duration {
    Duration::days(SESSION_DAYS)
}

/// Generates a new session token
///
/// 32 bytes from the OS CSPRNG, hex encoded: URL- and cookie-safe, 64 chars.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Issues a session for `user_id`
///
/// # Returns
///
/// Tuple of (token, expires_at)
pub async fn create_session(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<(String, DateTime<Utc>), sqlx::Error> {
    let now = Utc::now();
    let session = Session {
        token: generate_token(),
        user_id,
        created_at: now,
        expires_at: now + session_duration(),
    };

    Session::insert(conn, &session).await?;

    info!(user_id, expires_at = %session.expires_at, "Session created");
    Ok((session.token, session.expires_at))
}

/// Resolves a token to its user, purging it if expired
pub async fn resolve_session(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<CurrentUser>, sqlx::Error> {
    resolve_session_at(conn, token, Utc::now()).await
}

/// Same as [`resolve_session`] with an explicit clock
pub async fn resolve_session_at(
    conn: &mut SqliteConnection,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<CurrentUser>, sqlx::Error> {
    let Some(row) = Session::find_with_user(conn, token).await? else {
        return Ok(None);
    };

    if row.expires_at < now {
        Session::delete(conn, token).await?;
        warn!(user_id = row.user_id, "Expired session purged");
        return Ok(None);
    }

    Ok(Some(CurrentUser {
        id: row.user_id,
        username: row.username,
    }))
}

/// Deletes a session; revoking an unknown token is a no-op
pub async fn revoke_session(conn: &mut SqliteConnection, token: &str) -> Result<(), sqlx::Error> {
    let removed = Session::delete(conn, token).await?;
    debug!(removed, "Session revoked");
    Ok(())
}
