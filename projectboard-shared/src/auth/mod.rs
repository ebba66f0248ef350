/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: scrypt password hashing and the signup password policy
/// - [`session`]: opaque session tokens with lazy expiry
/// - [`cookie`]: the `pb_session` cookie
/// - [`middleware`]: request guard resolving the cookie to a [`middleware::CurrentUser`]
/// - [`authorization`]: project → task/note ownership chain
/// - [`account`]: signup, login, logout and admin bootstrap
///
/// # Security Features
///
/// - **Password Hashing**: scrypt, N = 2^14, r = 8, p = 1, 16-byte salt
/// - **Sessions**: 256-bit random tokens stored server-side, 7-day expiry
/// - **Constant-time Comparison**: derived keys are compared with `subtle`
/// - **No Enumeration**: login failures and foreign resources are indistinguishable
///
/// # Example
///
/// ```no_run
/// use projectboard_shared::auth::account::{login, signup};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let created = signup(&pool, "ada", "Analytical-Engine-1").await?;
/// let again = login(&pool, "ada", "Analytical-Engine-1").await?;
/// assert_eq!(created.user.id, again.user.id);
/// # Ok(())
/// # }
/// ```

pub mod account;
pub mod authorization;
pub mod cookie;
pub mod middleware;
pub mod password;
pub mod session;
