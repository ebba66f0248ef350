/// Project endpoints
///
/// All endpoints require a session. Projects owned by other users answer
/// `404 Not Found`, exactly like missing ones.
///
/// # Endpoints
///
/// - `GET /getProjects` - List the caller's projects
/// - `GET /getProject/:id` - One project
/// - `POST /addProject/` - Create a project
/// - `PATCH /projects/:id` - Partial update
/// - `DELETE /projects/:id` - Delete with all tasks and notes
///
/// # Project shape
///
/// ```json
/// {
///   "id": 1,
///   "title": "Engine",
///   "short_description": null,
///   "description": null,
///   "github": null,
///   "website": null,
///   "status": "active",
///   "notes": [{ "id": 1, "desc": "..." }],
///   "open": [{ "id": 1, "title": "...", "desc": null, "status": "open", "labels": [] }],
///   "in_progress": [],
///   "done": []
/// }
/// ```

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
        aggregate::ProjectView,
        projects::{self, NewProject, ProjectChanges},
    },
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub short_description: Option<String>,
    pub description: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,

    /// One of `idea`, `active`, `paused`, `done`
    pub status: String,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            title: req.title,
            short_description: req.short_description,
            description: req.description,
            github: req.github,
            website: req.website,
            status: req.status,
        }
    }
}

/// Delete project response
#[derive(Debug, Serialize)]
pub struct DeleteProjectResponse {
    pub success: bool,
    pub deleted_project_id: i64,
}

/// List the caller's projects, oldest first
pub async fn get_projects(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<ProjectView>>> {
    let views = projects::list_projects(&state.db, user.id).await?;
    Ok(Json(views))
}

/// Get one project
///
/// # Errors
///
/// - `404 Not Found`: Missing or owned by someone else
pub async fn get_project(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<ProjectView>> {
    let view = projects::get_project(&state.db, user.id, project_id).await?;
    Ok(Json(view))
}

/// Create a project
///
/// # Endpoint
///
/// ```text
/// POST /addProject/
/// Content-Type: application/json
///
/// { "title": "Engine", "status": "idea" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Blank title or unknown status
pub async fn add_project(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> ApiResult<Json<ProjectView>> {
    req.validate()?;

    let view = projects::create_project(&state.db, user.id, req.into()).await?;
    Ok(Json(view))
}

/// Partially update a project
///
/// Only supplied, non-null fields change. Answers with the full project.
pub async fn update_project(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
    ApiJson(changes): ApiJson<ProjectChanges>,
) -> ApiResult<Json<ProjectView>> {
    let view = projects::update_project(&state.db, user.id, project_id, changes).await?;
    Ok(Json(view))
}

/// Delete a project and everything in it
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<DeleteProjectResponse>> {
    projects::delete_project(&state.db, user.id, project_id).await?;

    Ok(Json(DeleteProjectResponse {
        success: true,
        deleted_project_id: project_id,
    }))
}
