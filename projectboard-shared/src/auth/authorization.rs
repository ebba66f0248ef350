/// Ownership checks
///
/// Every task and note lives inside a project, and every project belongs to
/// exactly one user. Access to a child entity therefore walks the ownership
/// chain:
///
/// 1. **Project**: `projects.id = X AND projects.user_id = caller`
/// 2. **Child**: `tasks.id = Y AND tasks.project_id = X` (or the note equivalent)
///
/// A failure at either step is reported as `NotFound`, never `Forbidden`, so
/// a caller cannot tell another user's resource from one that does not exist.
///
/// # Example
///
/// ```no_run
/// use projectboard_shared::auth::authorization::{require_project_owner, require_task_in_project};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool, user_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// let mut conn = pool.acquire().await?;
///
/// require_project_owner(&mut conn, 1, user_id).await?;
/// let task = require_task_in_project(&mut conn, 10, 1).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::SqliteConnection;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{note::Note, project::Project, task::Task};

/// Checks that `project_id` exists and belongs to `user_id`
///
/// # Errors
///
/// Returns `ServiceError::NotFound("Project not found")` otherwise.
pub async fn require_project_owner(
    conn: &mut SqliteConnection,
    project_id: i64,
    user_id: i64,
) -> ServiceResult<()> {
    if !Project::is_owned_by(conn, project_id, user_id).await? {
        return Err(ServiceError::not_found("Project"));
    }

    Ok(())
}

/// Loads an owned project
pub async fn require_owned_project(
    conn: &mut SqliteConnection,
    project_id: i64,
    user_id: i64,
) -> ServiceResult<Project> {
    Project::find_owned(conn, project_id, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))
}

/// Loads a task scoped to its (already verified) project
pub async fn require_task_in_project(
    conn: &mut SqliteConnection,
    task_id: i64,
    project_id: i64,
) -> ServiceResult<Task> {
    Task::find_in_project(conn, task_id, project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))
}

/// Loads a note scoped to its (already verified) project
pub async fn require_note_in_project(
    conn: &mut SqliteConnection,
    note_id: i64,
    project_id: i64,
) -> ServiceResult<Note> {
    Note::find_in_project(conn, note_id, project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Note"))
}
