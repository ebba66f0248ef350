/// Project operations
///
/// All reads go through [`build_projects`] so clients always see the full
/// aggregate. Every operation takes the caller's user ID; a project owned by
/// someone else behaves exactly like a missing one.

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::aggregate::{build_project, build_projects, ProjectView};
use super::require_non_empty;
use crate::auth::authorization::{require_owned_project, require_project_owner};
use crate::error::{ServiceError, ServiceResult};
use crate::models::project::{CreateProject, Project, ProjectStatus, UpdateProject};

/// Input for creating a project
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub status: String,
}

/// Partial project update; absent and `null` fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub status: Option<String>,
}

fn parse_status(value: &str) -> ServiceResult<ProjectStatus> {
    value.parse().map_err(ServiceError::InvalidArgument)
}

const EMPTY_TITLE: &str = "Project title cannot be empty";

/// Lists every project of `user_id`, oldest first
pub async fn list_projects(pool: &SqlitePool, user_id: i64) -> ServiceResult<Vec<ProjectView>> {
    let mut conn = pool.acquire().await?;

    let projects = Project::list_for_user(&mut conn, user_id).await?;
    let views = build_projects(&mut conn, projects).await?;

    debug!(user_id, count = views.len(), "Listed projects");
    Ok(views)
}

/// Loads one owned project
pub async fn get_project(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
) -> ServiceResult<ProjectView> {
    let mut conn = pool.acquire().await?;

    let project = require_owned_project(&mut conn, project_id, user_id).await?;
    Ok(build_project(&mut conn, project).await?)
}

/// Creates a project owned by `user_id`
///
/// # Errors
///
/// `InvalidArgument` for a blank title or a status outside
/// `idea | active | paused | done`.
pub async fn create_project(
    pool: &SqlitePool,
    user_id: i64,
    input: NewProject,
) -> ServiceResult<ProjectView> {
    require_non_empty(&input.title, EMPTY_TITLE)?;
    let status = parse_status(&input.status)?;

    let mut conn = pool.acquire().await?;

    let project = Project::create(
        &mut conn,
        user_id,
        CreateProject {
            title: input.title,
            short_description: input.short_description,
            description: input.description,
            github: input.github,
            website: input.website,
            status,
        },
    )
    .await?;

    info!(user_id, project_id = project.id, "Project created");

    Ok(ProjectView::empty(project))
}

/// Applies a partial update and returns the refreshed aggregate
pub async fn update_project(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
    changes: ProjectChanges,
) -> ServiceResult<ProjectView> {
    if let Some(title) = &changes.title {
        require_non_empty(title, EMPTY_TITLE)?;
    }
    let status = changes.status.as_deref().map(parse_status).transpose()?;

    let mut conn = pool.acquire().await?;

    require_project_owner(&mut conn, project_id, user_id).await?;

    Project::update(
        &mut conn,
        project_id,
        UpdateProject {
            title: changes.title,
            short_description: changes.short_description,
            description: changes.description,
            github: changes.github,
            website: changes.website,
            status,
        },
    )
    .await?;

    info!(user_id, project_id, "Project updated");

    let project = require_owned_project(&mut conn, project_id, user_id).await?;
    Ok(build_project(&mut conn, project).await?)
}

/// Deletes an owned project along with its tasks and notes
pub async fn delete_project(pool: &SqlitePool, user_id: i64, project_id: i64) -> ServiceResult<()> {
    let mut conn = pool.acquire().await?;

    require_project_owner(&mut conn, project_id, user_id).await?;

    if !Project::delete(&mut conn, project_id).await? {
        return Err(ServiceError::not_found("Project"));
    }

    info!(user_id, project_id, "Project deleted");
    Ok(())
}
