/// Shared helpers for integration tests
///
/// Every test gets its own in-memory database with migrations applied, so
/// tests run in parallel without touching each other or the filesystem.

use projectboard_shared::auth::account::{signup, AuthSession};
use projectboard_shared::board::projects::{create_project, NewProject};
use projectboard_shared::db::migrations::run_migrations;
use projectboard_shared::db::pool::{create_pool, DatabaseConfig};
use sqlx::SqlitePool;

#[allow(dead_code)]
pub const PASSWORD: &str = "Correct-Horse-9";

/// Fresh in-memory pool with the schema in place
pub async fn test_pool() -> SqlitePool {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create in-memory pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

/// Signs up `username` with a policy-compliant password
#[allow(dead_code)]
pub async fn create_user(pool: &SqlitePool, username: &str) -> AuthSession {
    signup(pool, username, PASSWORD)
        .await
        .expect("Failed to sign up test user")
}

/// Creates an `idea` project titled `title` and returns its ID
#[allow(dead_code)]
pub async fn create_test_project(pool: &SqlitePool, user_id: i64, title: &str) -> i64 {
    create_project(
        pool,
        user_id,
        NewProject {
            title: title.to_string(),
            status: "idea".to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to create test project")
    .id
}

/// Counts rows of `table` matching `project_id`
#[allow(dead_code)]
pub async fn count_children(pool: &SqlitePool, table: &str, project_id: i64) -> i64 {
    let query = format!("SELECT COUNT(*) FROM {} WHERE project_id = $1", table);
    sqlx::query_scalar(&query)
        .bind(project_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
