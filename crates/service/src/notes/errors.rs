use thiserror::Error;

/// Business errors for the notes workflows. Unanticipated failures land in
/// `Repository` and are mapped to a generic 500 by the HTTP layer.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid note id format")]
    InvalidId,
    #[error("note not found")]
    NotFound,
    #[error("a note with this title already exists; the title must be unique")]
    Conflict,
    #[error("repository error: {0}")]
    Repository(String),
}
