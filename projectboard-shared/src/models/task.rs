/// Task model and database operations
///
/// Tasks are kanban cards that live inside a project. Their lifecycle is tied
/// to the parent project (`ON DELETE CASCADE`).
///
/// # Status
///
/// ```text
/// open ⇄ in_progress ⇄ done
/// ```
///
/// Any status may be set from any other; there is no transition table.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title       TEXT NOT NULL,
///     description TEXT,
///     status      TEXT NOT NULL DEFAULT 'open' CHECK (status IN ('open', 'in_progress', 'done')),
///     labels_json TEXT NOT NULL DEFAULT '[]'
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::fmt;
use std::str::FromStr;

/// Kanban column of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TaskStatus::Open),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!("Invalid task status: {}", other)),
        }
    }
}

/// Task row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,

    /// JSON array of strings; may be corrupt in old data
    pub labels_json: String,
}

impl Task {
    /// Parses the stored labels, falling back to an empty list on corrupt data
    pub fn labels(&self) -> Vec<String> {
        match serde_json::from_str::<Vec<String>>(&self.labels_json) {
            Ok(labels) => labels,
            Err(e) => {
                tracing::warn!(
                    task_id = self.id,
                    error = %e,
                    "Corrupt labels_json, substituting empty labels"
                );
                Vec::new()
            }
        }
    }
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub labels: Vec<String>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub labels: Option<Vec<String>>,
}

const TASK_COLUMNS: &str = "id, project_id, title, description, status, labels_json";

fn encode_labels(labels: &[String]) -> Result<String, sqlx::Error> {
    serde_json::to_string(labels)
        .map_err(|e| sqlx::Error::Protocol(format!("Failed to encode labels: {}", e)))
}

impl Task {
    /// Inserts a task into a project
    pub async fn create(
        conn: &mut SqliteConnection,
        project_id: i64,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let labels_json = encode_labels(&data.labels)?;
        let query = format!(
            r#"
            INSERT INTO tasks (project_id, title, description, status, labels_json)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            TASK_COLUMNS
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(data.title)
            .bind(data.description)
            .bind(data.status)
            .bind(labels_json)
            .fetch_one(&mut *conn)
            .await
    }

    /// Finds a task by its compound key
    pub async fn find_in_project(
        conn: &mut SqliteConnection,
        id: i64,
        project_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM tasks WHERE id = $1 AND project_id = $2",
            TASK_COLUMNS
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Loads every task of the given projects, ordered by ID
    ///
    /// Issues a single query regardless of how many project IDs are given;
    /// an empty slice issues none.
    pub async fn list_for_projects(
        conn: &mut SqliteConnection,
        project_ids: &[i64],
    ) -> Result<Vec<Self>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM tasks WHERE project_id IN (",
            TASK_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in project_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id ASC");

        builder.build_query_as::<Task>().fetch_all(&mut *conn).await
    }

    /// Applies a coalesce merge scoped by `(id, project_id)`
    ///
    /// # Returns
    ///
    /// True if the row exists
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        project_id: i64,
        data: UpdateTask,
    ) -> Result<bool, sqlx::Error> {
        let labels_json = data.labels.as_deref().map(encode_labels).transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE tasks
               SET title       = COALESCE($1, title),
                   description = COALESCE($2, description),
                   status      = COALESCE($3, status),
                   labels_json = COALESCE($4, labels_json)
             WHERE id = $5 AND project_id = $6
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(labels_json)
        .bind(id)
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a task by its compound key
    ///
    /// A task ID paired with the wrong project deletes nothing.
    pub async fn delete(
        conn: &mut SqliteConnection,
        id: i64,
        project_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_labels(labels_json: &str) -> Task {
        Task {
            id: 1,
            project_id: 1,
            title: "t".to_string(),
            description: None,
            status: TaskStatus::Open,
            labels_json: labels_json.to_string(),
        }
    }

    #[test]
    fn test_task_status_parse() {
        assert_eq!("open".parse::<TaskStatus>(), Ok(TaskStatus::Open));
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Done));
        assert!("in-progress".parse::<TaskStatus>().is_err());
        assert!("idea".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_task_status_default_is_open() {
        assert_eq!(TaskStatus::default(), TaskStatus::Open);
    }

    #[test]
    fn test_task_status_serializes_snake_case() {
        let json = serde_json::to_value(TaskStatus::InProgress).unwrap();
        assert_eq!(json, "in_progress");
    }

    #[test]
    fn test_labels_parse() {
        let task = task_with_labels(r#"["bug","ui"]"#);
        assert_eq!(task.labels(), vec!["bug".to_string(), "ui".to_string()]);
    }

    #[test]
    fn test_corrupt_labels_become_empty() {
        assert!(task_with_labels("not json").labels().is_empty());
        assert!(task_with_labels(r#"{"a":1}"#).labels().is_empty());
        assert!(task_with_labels("").labels().is_empty());
    }

    #[test]
    fn test_encode_labels_keeps_order_and_unicode() {
        let encoded = encode_labels(&["zeta".to_string(), "äpfel".to_string()]).unwrap();
        assert_eq!(encoded, r#"["zeta","äpfel"]"#);
    }
}
