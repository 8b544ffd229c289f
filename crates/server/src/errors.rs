//! HTTP mapping of the service-layer error enums. Each service keeps its own
//! response shape; internal detail never leaves the process, only a message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use service::auth::errors::AuthError;
use service::books::errors::BookError;
use service::notes::errors::NoteError;

pub struct BooksApiError(pub BookError);

impl From<BookError> for BooksApiError {
    fn from(e: BookError) -> Self {
        Self(e)
    }
}

impl IntoResponse for BooksApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self.0 {
            BookError::Validation(_) | BookError::InvalidPage => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            BookError::NotFound | BookError::PageNotFound => {
                (StatusCode::NOT_FOUND, self.0.to_string())
            }
            BookError::Repository(detail) => {
                error!(error = %detail, "book repository failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
            }
        };
        (status, Json(json!({ "msg": msg }))).into_response()
    }
}

/// The notes fallback: every error a notes handler does not translate itself
/// funnels through here, carrying its status code and message (500 default).
pub struct NotesApiError(pub NoteError);

impl From<NoteError> for NotesApiError {
    fn from(e: NoteError) -> Self {
        Self(e)
    }
}

impl IntoResponse for NotesApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            NoteError::Validation(_) | NoteError::InvalidId => StatusCode::BAD_REQUEST,
            NoteError::NotFound => StatusCode::NOT_FOUND,
            NoteError::Conflict => StatusCode::CONFLICT,
            NoteError::Repository(detail) => {
                error!(error = %detail, "note repository failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "success": false, "message": self.0.to_string() }))).into_response()
    }
}

pub struct AuthApiError(pub AuthError);

impl From<AuthError> for AuthApiError {
    fn from(e: AuthError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self.0 {
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            AuthError::Conflict => (StatusCode::CONFLICT, self.0.to_string()),
            AuthError::Unauthorized | AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, self.0.to_string())
            }
            AuthError::Forbidden => (StatusCode::FORBIDDEN, self.0.to_string()),
            AuthError::TokenError(detail) | AuthError::Repository(detail) => {
                error!(error = %detail, "auth internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };
        (status, Json(json!({ "message": msg }))).into_response()
    }
}
