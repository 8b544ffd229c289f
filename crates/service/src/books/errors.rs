use thiserror::Error;

/// Business errors for the book catalog.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("{0}")]
    Validation(String),
    #[error("book not found")]
    NotFound,
    #[error("page not found")]
    PageNotFound,
    #[error("page number cannot be less than 1")]
    InvalidPage,
    #[error("repository error: {0}")]
    Repository(String),
}
