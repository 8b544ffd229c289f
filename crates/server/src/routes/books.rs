use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use service::books::domain::{BookPage, CreateBook};
use service::books::errors::BookError;
use service::books::service::BookService;
use service::pagination;

use crate::errors::BooksApiError;

#[derive(Clone)]
pub struct BooksState {
    pub svc: Arc<BookService>,
}

/// Raw strings so that non-numeric input coerces to the defaults instead of
/// failing extraction.
#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
}

async fn create_book(
    State(state): State<BooksState>,
    Json(input): Json<CreateBook>,
) -> Result<(StatusCode, Json<Value>), BooksApiError> {
    let book = state.svc.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "book added successfully", "book": book })),
    ))
}

async fn list_books(
    State(state): State<BooksState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<BookPage>, BooksApiError> {
    let page = pagination::coerce(query.page.as_deref(), 1);
    let limit = pagination::coerce(query.limit.as_deref(), 10);
    Ok(Json(state.svc.list(page, limit).await?))
}

async fn delete_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, BooksApiError> {
    // A malformed id maps to the same 404 as an unknown one.
    let id = Uuid::parse_str(&id).map_err(|_| BooksApiError(BookError::NotFound))?;
    state.svc.delete(id).await?;
    Ok(Json(json!({ "message": "book deleted successfully" })))
}

pub fn build_router(state: BooksState) -> Router {
    Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route("/api/books/:id", delete(delete_book))
        .route("/health", get(super::health))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(super::trace_layer())
}
