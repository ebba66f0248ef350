//! # Project Board Shared Library
//!
//! Storage, authentication and board logic behind the Project Board API.
//! Nothing here speaks HTTP beyond reading the session cookie; the API crate
//! maps [`error::ServiceError`] onto status codes.
//!
//! ## Module Organization
//!
//! - `db`: SQLite pool and migrations
//! - `models`: row types and their queries
//! - `auth`: passwords, sessions, the request guard and ownership checks
//! - `board`: project, task and note operations plus the aggregate builder
//! - `error`: the service error taxonomy

pub mod auth;
pub mod board;
pub mod db;
pub mod error;
pub mod models;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
