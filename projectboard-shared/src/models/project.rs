/// Project model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id                INTEGER PRIMARY KEY AUTOINCREMENT,
///     title             TEXT NOT NULL,
///     short_description TEXT,
///     description       TEXT,
///     github            TEXT,
///     website           TEXT,
///     status            TEXT NOT NULL CHECK (status IN ('idea', 'active', 'paused', 'done')),
///     user_id           INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// );
/// ```
///
/// Every query that reads or writes a single project by ID is either scoped
/// by `user_id` or preceded by an ownership check in the board layer.

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Idea,
    Active,
    Paused,
    Done,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Idea => "idea",
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Done => "done",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idea" => Ok(ProjectStatus::Idea),
            "active" => Ok(ProjectStatus::Active),
            "paused" => Ok(ProjectStatus::Paused),
            "done" => Ok(ProjectStatus::Done),
            other => Err(format!("Invalid project status: {}", other)),
        }
    }
}

/// Project row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub status: ProjectStatus,

    /// Owner; never serialized to clients
    pub user_id: i64,
}

/// Input for creating a project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub status: ProjectStatus,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub status: Option<ProjectStatus>,
}

const PROJECT_COLUMNS: &str =
    "id, title, short_description, description, github, website, status, user_id";

impl Project {
    /// Inserts a project owned by `user_id`
    pub async fn create(
        conn: &mut SqliteConnection,
        user_id: i64,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO projects (title, short_description, description, github, website, status, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(data.title)
            .bind(data.short_description)
            .bind(data.description)
            .bind(data.github)
            .bind(data.website)
            .bind(data.status)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Finds a project by ID, only if it belongs to `user_id`
    pub async fn find_owned(
        conn: &mut SqliteConnection,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM projects WHERE id = $1 AND user_id = $2",
            PROJECT_COLUMNS
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Checks that a project exists and belongs to `user_id`
    pub async fn is_owned_by(
        conn: &mut SqliteConnection,
        id: i64,
        user_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let owned: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(owned)
    }

    /// Lists all projects of a user, oldest first
    pub async fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM projects WHERE user_id = $1 ORDER BY id ASC",
            PROJECT_COLUMNS
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Applies a coalesce merge: only `Some` fields overwrite stored values
    ///
    /// # Returns
    ///
    /// True if the row exists
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        data: UpdateProject,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE projects
               SET title             = COALESCE($1, title),
                   short_description = COALESCE($2, short_description),
                   description       = COALESCE($3, description),
                   github            = COALESCE($4, github),
                   website           = COALESCE($5, website),
                   status            = COALESCE($6, status)
             WHERE id = $7
            "#,
        )
        .bind(data.title)
        .bind(data.short_description)
        .bind(data.description)
        .bind(data.github)
        .bind(data.website)
        .bind(data.status)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a project; tasks and notes cascade
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
