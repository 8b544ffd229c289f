use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use service::notes::domain::{CreateNote, NoteChanges};
use service::notes::errors::NoteError;
use service::notes::service::NoteService;

use crate::errors::NotesApiError;

#[derive(Clone)]
pub struct NotesState {
    pub svc: Arc<NoteService>,
}

/// Unlike the book catalog, a malformed id here is a 400, not a 404.
fn parse_note_id(raw: &str) -> Result<Uuid, NotesApiError> {
    Uuid::parse_str(raw).map_err(|_| NotesApiError(NoteError::InvalidId))
}

async fn list_notes(State(state): State<NotesState>) -> Result<Json<Value>, NotesApiError> {
    let notes = state.svc.list().await?;
    Ok(Json(json!({
        "success": true,
        "count": notes.len(),
        "data": notes,
        "message": "notes retrieved successfully"
    })))
}

async fn create_note(
    State(state): State<NotesState>,
    Json(input): Json<CreateNote>,
) -> Result<(StatusCode, Json<Value>), NotesApiError> {
    let note = state.svc.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": note, "message": "note created successfully" })),
    ))
}

async fn update_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
    Json(changes): Json<NoteChanges>,
) -> Result<Json<Value>, NotesApiError> {
    let id = parse_note_id(&id)?;
    let note = state.svc.update(id, changes, false).await?;
    Ok(Json(json!({ "success": true, "data": note, "message": "note updated successfully" })))
}

async fn patch_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
    Json(changes): Json<NoteChanges>,
) -> Result<Json<Value>, NotesApiError> {
    let id = parse_note_id(&id)?;
    let note = state.svc.update(id, changes, true).await?;
    Ok(Json(json!({
        "success": true,
        "data": note,
        "message": "note partially updated successfully"
    })))
}

async fn delete_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
) -> Result<StatusCode, NotesApiError> {
    let id = parse_note_id(&id)?;
    state.svc.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn build_router(state: NotesState) -> Router {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/:id",
            axum::routing::put(update_note)
                .patch(patch_note)
                .delete(delete_note),
        )
        .route("/health", get(super::health))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(super::trace_layer())
}
