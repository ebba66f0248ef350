/// Task operations
///
/// Every operation first checks that the project belongs to the caller, then
/// addresses the task by `(task_id, project_id)` so a task ID borrowed from
/// another project never matches.

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use super::aggregate::TaskView;
use super::require_non_empty;
use crate::auth::authorization::{require_project_owner, require_task_in_project};
use crate::error::{ServiceError, ServiceResult};
use crate::models::task::{CreateTask, Task, TaskStatus, UpdateTask};

/// Input for creating a task
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub status: Option<String>,
    pub labels: Option<Vec<String>>,
}

/// Partial task update; absent and `null` fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub status: Option<String>,
    pub labels: Option<Vec<String>>,
}

const EMPTY_TITLE: &str = "Task title cannot be empty";

fn parse_status(value: &str) -> ServiceResult<TaskStatus> {
    value.parse().map_err(ServiceError::InvalidArgument)
}

/// Adds a task to an owned project
///
/// The title is stored trimmed. A missing or empty status means `open`.
pub async fn create_task(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
    input: NewTask,
) -> ServiceResult<TaskView> {
    let title = input.title.as_deref().unwrap_or_default().trim().to_string();
    require_non_empty(&title, EMPTY_TITLE)?;

    let status = match input.status.as_deref() {
        None | Some("") => TaskStatus::default(),
        Some(value) => parse_status(value)?,
    };

    let mut conn = pool.acquire().await?;

    require_project_owner(&mut conn, project_id, user_id).await?;

    let task = Task::create(
        &mut conn,
        project_id,
        CreateTask {
            title,
            description: input.desc,
            status,
            labels: input.labels.unwrap_or_default(),
        },
    )
    .await?;

    info!(user_id, project_id, task_id = task.id, status = %task.status, "Task created");

    Ok(task.into())
}

/// Applies a partial update and returns the stored task
///
/// A new title is stored trimmed. An empty status counts as absent, the same
/// way it does on create, so the stored status is kept.
pub async fn update_task(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
    task_id: i64,
    changes: TaskChanges,
) -> ServiceResult<TaskView> {
    let title = match changes.title.as_deref() {
        Some(title) => {
            let title = title.trim().to_string();
            require_non_empty(&title, EMPTY_TITLE)?;
            Some(title)
        }
        None => None,
    };
    let status = match changes.status.as_deref() {
        None | Some("") => None,
        Some(value) => Some(parse_status(value)?),
    };

    let mut conn = pool.acquire().await?;

    require_project_owner(&mut conn, project_id, user_id).await?;
    require_task_in_project(&mut conn, task_id, project_id).await?;

    Task::update(
        &mut conn,
        task_id,
        project_id,
        UpdateTask {
            title,
            description: changes.desc,
            status,
            labels: changes.labels,
        },
    )
    .await?;

    let task = require_task_in_project(&mut conn, task_id, project_id).await?;

    info!(user_id, project_id, task_id, status = %task.status, "Task updated");

    Ok(task.into())
}

/// Removes a task from an owned project
pub async fn delete_task(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
    task_id: i64,
) -> ServiceResult<()> {
    let mut conn = pool.acquire().await?;

    require_project_owner(&mut conn, project_id, user_id).await?;

    if !Task::delete(&mut conn, task_id, project_id).await? {
        return Err(ServiceError::not_found("Task"));
    }

    info!(user_id, project_id, task_id, "Task deleted");
    Ok(())
}
