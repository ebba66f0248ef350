/// Note endpoints
///
/// - `POST /projects/:id/notes` - Add a note, body `{ "desc": "..." }`
/// - `PATCH /projects/:id/notes/:note_id` - Edit; a missing `desc` changes nothing
/// - `DELETE /projects/:id/notes/:note_id` - Delete

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
        aggregate::NoteView,
        notes::{self, NoteInput},
    },
};
use serde::Serialize;

/// Delete note response
#[derive(Debug, Serialize)]
pub struct DeleteNoteResponse {
    pub success: bool,
    pub deleted_note_id: i64,
}

pub async fn add_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
    ApiJson(input): ApiJson<NoteInput>,
) -> ApiResult<Json<NoteView>> {
    let note = notes::create_note(&state.db, user.id, project_id, input).await?;
    Ok(Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((project_id, note_id)): Path<(i64, i64)>,
    ApiJson(input): ApiJson<NoteInput>,
) -> ApiResult<Json<NoteView>> {
    let note = notes::update_note(&state.db, user.id, project_id, note_id, input).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((project_id, note_id)): Path<(i64, i64)>,
) -> ApiResult<Json<DeleteNoteResponse>> {
    notes::delete_note(&state.db, user.id, project_id, note_id).await?;

    Ok(Json(DeleteNoteResponse {
        success: true,
        deleted_note_id: note_id,
    }))
}
