/// Account operations: signup, login, logout and admin bootstrap
///
/// Signup and login both end by issuing a session, so callers get back an
/// [`AuthSession`] carrying the token to put in the cookie.
///
/// Login never reveals whether the username exists: an unknown user and a
/// wrong password produce the same `Unauthorized("Invalid credentials")`.

use chrono::{DateTime, Utc};
use sqlx::{error::ErrorKind, SqlitePool};
use tracing::{info, warn};

use super::{
    middleware::CurrentUser,
    password::{hash_password, validate_password_policy, verify_password, DUMMY_PASSWORD_HASH},
    session::{create_session, revoke_session},
};
use crate::error::{ServiceError, ServiceResult};
use crate::models::user::{CreateUser, User};

/// Minimum username length, counted after trimming
pub const MIN_USERNAME_LEN: usize = 3;

/// Freshly issued session for a user
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The authenticated user
    pub user: CurrentUser,

    /// Session token for the cookie
    pub token: String,

    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

fn username_taken() -> ServiceError {
    ServiceError::Conflict("Username already taken".to_string())
}

fn invalid_credentials() -> ServiceError {
    ServiceError::Unauthorized("Invalid credentials".to_string())
}

/// Registers a new user and logs them in
///
/// # Errors
///
/// - `InvalidArgument` if the trimmed username is shorter than 3 characters
/// - `PasswordPolicy` listing every violated password rule
/// - `Conflict` if the username is already taken
pub async fn signup(pool: &SqlitePool, username: &str, password: &str) -> ServiceResult<AuthSession> {
    let username = username.trim();
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(ServiceError::invalid(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LEN
        )));
    }

    let violations = validate_password_policy(password);
    if !violations.is_empty() {
        return Err(ServiceError::PasswordPolicy(violations));
    }

    let mut conn = pool.acquire().await?;

    if User::username_exists(&mut conn, username).await? {
        return Err(username_taken());
    }

    let password_hash = hash_password(password)?;

    // The pre-check can race with a concurrent signup; the unique index decides.
    let user = match User::create(
        &mut conn,
        CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    {
        Ok(user) => user,
        Err(sqlx::Error::Database(e)) if matches!(e.kind(), ErrorKind::UniqueViolation) => {
            return Err(username_taken());
        }
        Err(e) => return Err(e.into()),
    };

    let (token, expires_at) = create_session(&mut conn, user.id).await?;

    info!(user_id = user.id, username = %user.username, "User signed up");

    Ok(AuthSession {
        user: user.into(),
        token,
        expires_at,
    })
}

/// Verifies credentials and issues a session
///
/// # Errors
///
/// Returns `Unauthorized("Invalid credentials")` for an unknown username or a
/// wrong password alike.
pub async fn login(pool: &SqlitePool, username: &str, password: &str) -> ServiceResult<AuthSession> {
    let mut conn = pool.acquire().await?;

    let user = match User::find_by_username(&mut conn, username).await? {
        Some(user) if verify_password(password, &user.password_hash) => user,
        Some(_) => {
            warn!("Rejected login attempt");
            return Err(invalid_credentials());
        }
        None => {
            // Same KDF cost as a wrong password
            verify_password(password, DUMMY_PASSWORD_HASH);
            warn!("Rejected login attempt");
            return Err(invalid_credentials());
        }
    };

    let (token, expires_at) = create_session(&mut conn, user.id).await?;

    info!(user_id = user.id, "User logged in");

    Ok(AuthSession {
        user: user.into(),
        token,
        expires_at,
    })
}

/// Ends a session
///
/// Succeeds whether or not a token was given or known.
pub async fn logout(pool: &SqlitePool, token: Option<&str>) -> ServiceResult<()> {
    if let Some(token) = token {
        let mut conn = pool.acquire().await?;
        revoke_session(&mut conn, token).await?;
    }

    Ok(())
}

/// Creates the bootstrap admin when the user table is empty
///
/// Does nothing once any user exists. With an empty table but no configured
/// credentials, logs a warning and does nothing; signup still works.
///
/// # Returns
///
/// The created user, if one was created
pub async fn ensure_default_user(
    pool: &SqlitePool,
    username: Option<&str>,
    password: Option<&str>,
) -> ServiceResult<Option<CurrentUser>> {
    let mut conn = pool.acquire().await?;

    if User::count(&mut conn).await? > 0 {
        return Ok(None);
    }

    let (Some(username), Some(password)) = (username.map(str::trim), password) else {
        warn!("No users exist and no bootstrap admin credentials are configured");
        return Ok(None);
    };

    if username.is_empty() || password.is_empty() {
        warn!("Bootstrap admin credentials are empty, skipping");
        return Ok(None);
    }

    let user = User::create(
        &mut conn,
        CreateUser {
            username: username.to_string(),
            password_hash: hash_password(password)?,
        },
    )
    .await?;

    info!(user_id = user.id, username = %user.username, "Bootstrap admin created");

    Ok(Some(user.into()))
}
