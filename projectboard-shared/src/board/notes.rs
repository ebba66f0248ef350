/// Note operations
///
/// Notes are free-text entries on a project. Clients call the body `desc`.

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use super::aggregate::NoteView;
use super::require_non_empty;
use crate::auth::authorization::{require_note_in_project, require_project_owner};
use crate::error::{ServiceError, ServiceResult};
use crate::models::note::Note;

/// Note body as sent by clients, for both create and edit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteInput {
    pub desc: Option<String>,
}

const EMPTY_BODY: &str = "Note body cannot be empty";

/// Adds a note to an owned project; the body is stored trimmed
pub async fn create_note(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
    input: NoteInput,
) -> ServiceResult<NoteView> {
    let body = input.desc.as_deref().unwrap_or_default().trim();
    require_non_empty(body, EMPTY_BODY)?;

    let mut conn = pool.acquire().await?;

    require_project_owner(&mut conn, project_id, user_id).await?;

    let note = Note::create(&mut conn, project_id, body).await?;

    info!(user_id, project_id, note_id = note.id, "Note created");

    Ok(note.into())
}

/// Edits a note
///
/// An absent or `null` `desc` leaves the body unchanged. A supplied `desc`
/// is trimmed and must not be empty.
pub async fn update_note(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
    note_id: i64,
    input: NoteInput,
) -> ServiceResult<NoteView> {
    let body = input.desc.as_deref().map(str::trim);
    if let Some(body) = body {
        require_non_empty(body, EMPTY_BODY)?;
    }

    let mut conn = pool.acquire().await?;

    require_project_owner(&mut conn, project_id, user_id).await?;
    require_note_in_project(&mut conn, note_id, project_id).await?;

    Note::update(&mut conn, note_id, project_id, body).await?;

    let note = require_note_in_project(&mut conn, note_id, project_id).await?;

    info!(user_id, project_id, note_id, "Note updated");

    Ok(note.into())
}

/// Removes a note from an owned project
pub async fn delete_note(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
    note_id: i64,
) -> ServiceResult<()> {
    let mut conn = pool.acquire().await?;

    require_project_owner(&mut conn, project_id, user_id).await?;

    if !Note::delete(&mut conn, note_id, project_id).await? {
        return Err(ServiceError::not_found("Note"));
    }

    info!(user_id, project_id, note_id, "Note deleted");
    Ok(())
}
