/// Project aggregate builder
///
/// Turns owned project rows into the nested shape clients render: each
/// project carries its notes and its tasks split into `open`,
/// `in_progress` and `done` buckets.
///
/// Children are fetched in batch: one notes query and one tasks query for
/// the whole input, never one per project.

use serde::Serialize;
use sqlx::SqliteConnection;
use std::collections::HashMap;

use crate::models::{
    note::Note,
    project::{Project, ProjectStatus},
    task::{Task, TaskStatus},
};

/// Note as rendered to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteView {
    pub id: i64,
    pub desc: String,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            desc: note.body,
        }
    }
}

/// Task as rendered to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: i64,
    pub title: String,
    pub desc: Option<String>,
    pub status: TaskStatus,
    pub labels: Vec<String>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        let labels = task.labels();
        Self {
            id: task.id,
            title: task.title,
            desc: task.description,
            status: task.status,
            labels,
        }
    }
}

/// Project with its notes and bucketed tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectView {
    pub id: i64,
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub status: ProjectStatus,
    pub notes: Vec<NoteView>,
    pub open: Vec<TaskView>,
    pub in_progress: Vec<TaskView>,
    pub done: Vec<TaskView>,
}

impl ProjectView {
    /// View of a project with no children loaded
    pub fn empty(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            short_description: project.short_description,
            description: project.description,
            github: project.github,
            website: project.website,
            status: project.status,
            notes: Vec::new(),
            open: Vec::new(),
            in_progress: Vec::new(),
            done: Vec::new(),
        }
    }

    fn push_task(&mut self, task: Task) {
        let bucket = match task.status {
            TaskStatus::Open => &mut self.open,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        };
        bucket.push(task.into());
    }
}

/// Builds views for `projects`, preserving their order
///
/// The caller is responsible for having scoped `projects` to one owner.
/// Children arrive ordered by ID from the store, so every bucket and the
/// notes list come out ordered by ID too.
pub async fn build_projects(
    conn: &mut SqliteConnection,
    projects: Vec<Project>,
) -> Result<Vec<ProjectView>, sqlx::Error> {
    if projects.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = projects.iter().map(|p| p.id).collect();
    let notes = Note::list_for_projects(conn, &ids).await?;
    let tasks = Task::list_for_projects(conn, &ids).await?;

    let index: HashMap<i64, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let mut views: Vec<ProjectView> = projects.into_iter().map(ProjectView::empty).collect();

    for note in notes {
        if let Some(&i) = index.get(&note.project_id) {
            views[i].notes.push(note.into());
        }
    }

    for task in tasks {
        if let Some(&i) = index.get(&task.project_id) {
            views[i].push_task(task);
        }
    }

    Ok(views)
}

/// Builds the view of a single project
pub async fn build_project(
    conn: &mut SqliteConnection,
    project: Project,
) -> Result<ProjectView, sqlx::Error> {
    let mut views = build_projects(conn, vec![project]).await?;
    views.pop().ok_or(sqlx::Error::RowNotFound)
}
