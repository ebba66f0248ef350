/// Database connection pool management
///
/// This module builds the SQLite connection pool used by every request. Each
/// operation acquires one pooled connection and returns it on drop, so every
/// exit path (success, validation failure, store error) releases it.
///
/// Foreign keys are enabled on every connection; project, task and note
/// cascades depend on it.
///
/// # Example
///
/// ```no_run
/// use projectboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         path: "projects.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Path that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite file path, or [`IN_MEMORY`]
    ///
    /// The file is created if it does not exist.
    pub path: String,

    /// Maximum number of connections in the pool
    ///
    /// Forced to 1 for in-memory databases, since each in-memory connection
    /// would otherwise see its own empty database.
    pub max_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub acquire_timeout_seconds: u64,

    /// How long SQLite waits on a locked database before failing (seconds)
    pub busy_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "projects.db".to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 30,
            busy_timeout_seconds: 5,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY.to_string(),
            max_connections: 1,
            ..Default::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }
}

/// Creates and initializes a SQLite connection pool
///
/// # Errors
///
/// Returns an error if the path is unusable or the health check fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = config.is_in_memory();
    let max_connections = if in_memory { 1 } else { config.max_connections };

    info!(
        path = %config.path,
        max_connections,
        "Creating database connection pool"
    );

    let options = if in_memory {
        SqliteConnectOptions::from_str("sqlite::memory:")?
    } else {
        SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
    };

    let options = options
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_seconds));

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds));

    if in_memory {
        // Dropping the only connection would drop the database with it
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
        debug!("Using a single pinned connection for the in-memory database");
    }

    let pool = pool_options.connect_with(options).await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Gracefully closes the connection pool
pub async fn close_pool(pool: SqlitePool) {
    info!("Closing database connection pool");
    pool.close().await;
    info!("Database connection pool closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "projects.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_seconds, 30);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_in_memory_config() {
        let config = DatabaseConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
    }

    #[tokio::test]
    async fn test_in_memory_pool_is_healthy() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        health_check(&pool).await.unwrap();

        let fk: (i64,) = sqlx::query_as("PRAGMA foreign_keys").fetch_one(&pool).await.unwrap();
        assert_eq!(fk.0, 1, "foreign keys must be enforced");

        close_pool(pool).await;
    }
}
