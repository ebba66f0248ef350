/// Session rows
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     token      TEXT PRIMARY KEY,
///     user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TEXT NOT NULL,
///     expires_at TEXT NOT NULL
/// );
/// ```
///
/// Token generation and expiry policy live in [`crate::auth::session`];
/// this module only moves rows.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

/// Stored session
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Opaque bearer token (primary key)
    pub token: String,

    /// Owner of the session
    pub user_id: i64,

    /// When the session was issued
    pub created_at: DateTime<Utc>,

    /// When the session stops being valid
    pub expires_at: DateTime<Utc>,
}

/// Session joined with the username of its owner
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionWithUser {
    pub user_id: i64,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Inserts a session row
    pub async fn insert(conn: &mut SqliteConnection, session: &Session) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Finds a session by token
    pub async fn find(conn: &mut SqliteConnection, token: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            "SELECT token, user_id, created_at, expires_at FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Looks up a session together with its user
    pub async fn find_with_user(
        conn: &mut SqliteConnection,
        token: &str,
    ) -> Result<Option<SessionWithUser>, sqlx::Error> {
        sqlx::query_as::<_, SessionWithUser>(
            r#"
            SELECT users.id AS user_id, users.username AS username, sessions.expires_at AS expires_at
            FROM sessions
            JOIN users ON users.id = sessions.user_id
            WHERE sessions.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Deletes a session by token
    ///
    /// # Returns
    ///
    /// True if a row was removed
    pub async fn delete(conn: &mut SqliteConnection, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts sessions belonging to a user
    pub async fn count_for_user(conn: &mut SqliteConnection, user_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
