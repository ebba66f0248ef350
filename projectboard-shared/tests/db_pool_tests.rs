/// Integration tests for the file-backed database pool
///
/// Each test works on its own throwaway SQLite file under the system temp
/// directory. Run with: cargo test --test db_pool_tests

use projectboard_shared::db::migrations::{get_migration_status, run_migrations};
use projectboard_shared::db::pool::{close_pool, create_pool, health_check, DatabaseConfig};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique database path for one test
fn temp_db_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("projectboard-{}-{}-{}.db", name, std::process::id(), nanos))
}

/// Removes the database file and its WAL companions
fn remove_db(path: &PathBuf) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

fn file_config(path: &PathBuf) -> DatabaseConfig {
    DatabaseConfig {
        path: path.to_string_lossy().into_owned(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_pool_creates_missing_file() {
    let path = temp_db_path("create");
    assert!(!path.exists());

    let pool = create_pool(file_config(&path)).await.expect("Failed to create pool");
    health_check(&pool).await.expect("Health check should succeed");
    assert!(path.exists(), "database file should be created");

    let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");

    let fk: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(fk, 1);

    close_pool(pool).await;
    remove_db(&path);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let path = temp_db_path("reopen");

    let pool = create_pool(file_config(&path)).await.unwrap();
    run_migrations(&pool).await.unwrap();
    sqlx::query("INSERT INTO users (username, password_hash) VALUES ('ada', 'x')")
        .execute(&pool)
        .await
        .unwrap();
    close_pool(pool).await;

    let pool = create_pool(file_config(&path)).await.unwrap();
    run_migrations(&pool).await.expect("re-running migrations should be a no-op");

    let status = get_migration_status(&pool).await.unwrap();
    assert_eq!(status.applied_migrations, 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    close_pool(pool).await;
    remove_db(&path);
}

#[tokio::test]
async fn test_pool_concurrent_queries() {
    let path = temp_db_path("concurrent");
    let config = DatabaseConfig {
        max_connections: 3,
        ..file_config(&path)
    };

    let pool = create_pool(config).await.expect("Failed to create pool");

    // More tasks than connections, so some wait for a free one
    let mut handles = vec![];
    for i in 0..12i64 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let value: i64 = sqlx::query_scalar("SELECT $1")
                .bind(i)
                .fetch_one(&pool)
                .await
                .expect("Failed to execute query");
            assert_eq!(value, i);
        }));
    }

    for handle in handles {
        handle.await.expect("Task panicked");
    }

    close_pool(pool).await;
    remove_db(&path);
}
