/// Error taxonomy for account and board operations
///
/// Every operation in this crate returns [`ServiceError`]. The API crate maps
/// each variant onto an HTTP status; nothing here knows about HTTP.
///
/// # Classification
///
/// - `Unauthorized`: no session, unknown token, expired session, bad login
/// - `NotFound`: entity absent *or* owned by someone else (deliberately the same)
/// - `InvalidArgument`: bad enum value, empty required field, integrity violation
/// - `PasswordPolicy`: every violated password rule, in order
/// - `Conflict`: username already taken
/// - `Internal` / `Database`: unexpected store failures

use sqlx::error::ErrorKind;

use crate::auth::password::PasswordError;

/// Result alias used by account and board operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by account and board operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Missing, unknown or expired session, or rejected credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Entity does not exist or is not visible to the caller
    #[error("{0}")]
    NotFound(String),

    /// Request violates a field or enum constraint
    #[error("{0}")]
    InvalidArgument(String),

    /// Password rejected by the signup policy
    #[error("Password does not satisfy the policy: {}", .0.join("; "))]
    PasswordPolicy(Vec<String>),

    /// Unique resource already exists
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure that is not the caller's fault
    #[error("Internal error: {0}")]
    Internal(String),

    /// Store failure that is not an integrity violation
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl ServiceError {
    pub fn not_found(what: &str) -> Self {
        ServiceError::NotFound(format!("{} not found", what))
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        ServiceError::InvalidArgument(msg.into())
    }
}

/// Integrity violations surface as `InvalidArgument` with the store's message;
/// everything else stays a database error.
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return ServiceError::InvalidArgument(db_err.message().to_string());
                }
                _ => {}
            }
        }
        ServiceError::Database(err)
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("Project");
        assert_eq!(err.to_string(), "Project not found");
    }

    #[test]
    fn test_password_policy_display_lists_every_violation() {
        let err = ServiceError::PasswordPolicy(vec!["one".to_string(), "two".to_string()]);
        let text = err.to_string();
        assert!(text.contains("one"));
        assert!(text.contains("two"));
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err: ServiceError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ServiceError::Database(_)));
    }
}
