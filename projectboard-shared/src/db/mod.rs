/// Database layer for the project board
///
/// # Modules
///
/// - `pool`: SQLite connection pool with foreign keys enforced
/// - `migrations`: embedded sqlx migrations
///
/// # Example
///
/// ```no_run
/// use projectboard_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig::in_memory()).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
