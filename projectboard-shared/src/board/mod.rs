/// Project board operations
///
/// Each operation takes the pool and the caller's user ID, validates its
/// input before touching the store, acquires a single pooled connection and
/// runs every statement on it.
///
/// # Modules
///
/// - [`aggregate`]: nested project views with notes and task buckets
/// - [`projects`]: list, get, create, update and delete projects
/// - [`tasks`]: create, update and delete tasks within a project
/// - [`notes`]: create, update and delete notes within a project

pub mod aggregate;
pub mod notes;
pub mod projects;
pub mod tasks;

use crate::error::{ServiceError, ServiceResult};

pub(crate) fn require_non_empty(value: &str, message: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::invalid(message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("x", "empty").is_ok());
        assert!(require_non_empty("  \t", "empty").is_err());
        assert!(require_non_empty("", "empty").is_err());
    }
}
