/// Task endpoints
///
/// # Endpoints
///
/// - `POST /projects/:id/tasks` - Add a task
/// - `PATCH /projects/:id/tasks/:task_id` - Partial update
/// - `DELETE /projects/:id/tasks/:task_id` - Delete
///
/// Tasks are addressed through their project; a task ID used under the wrong
/// project answers `404 Task not found`.

use crate::{
    app::AppState,
    error::{ApiJson, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use projectboard_shared::{
    auth::middleware::CurrentUser,
    board::{
        aggregate::TaskView,
        tasks::{self, NewTask, TaskChanges},
    },
};
use serde::Serialize;

/// Delete task response
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    pub success: bool,
    pub deleted_task_id: i64,
}

/// Add a task
///
/// # Endpoint
///
/// ```text
/// POST /projects/1/tasks
/// Content-Type: application/json
///
/// { "title": "Write docs", "desc": "README", "status": "open", "labels": ["docs"] }
/// ```
///
/// `status` defaults to `open`; `labels` defaults to `[]`.
pub async fn add_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
    ApiJson(input): ApiJson<NewTask>,
) -> ApiResult<Json<TaskView>> {
    let task = tasks::create_task(&state.db, user.id, project_id, input).await?;
    Ok(Json(task))
}

/// Partially update a task and answer with its stored state
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((project_id, task_id)): Path<(i64, i64)>,
    ApiJson(changes): ApiJson<TaskChanges>,
) -> ApiResult<Json<TaskView>> {
    let task = tasks::update_task(&state.db, user.id, project_id, task_id, changes).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((project_id, task_id)): Path<(i64, i64)>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    tasks::delete_task(&state.db, user.id, project_id, task_id).await?;

    Ok(Json(DeleteTaskResponse {
        success: true,
        deleted_task_id: task_id,
    }))
}
