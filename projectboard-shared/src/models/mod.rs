/// Database models for the project board
///
/// Each model is a plain row struct with associated async functions that take
/// the connection explicitly. Validation and ownership checks live in
/// [`crate::board`] and [`crate::auth`]; models only move rows.
///
/// # Models
///
/// - `user`: accounts and password hashes
/// - `session`: opaque session tokens with expiry
/// - `project`: projects owned by a user
/// - `task`: kanban tasks inside a project
/// - `note`: free-text notes inside a project
///
/// # Example
///
/// ```no_run
/// use projectboard_shared::models::project::{CreateProject, Project, ProjectStatus};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
/// let mut conn = pool.acquire().await?;
///
/// let project = Project::create(&mut conn, user_id, CreateProject {
///     title: "Garden shed".to_string(),
///     short_description: None,
///     description: None,
///     github: None,
///     website: None,
///     status: ProjectStatus::Idea,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod note;
pub mod project;
pub mod session;
pub mod task;
pub mod user;
