use thiserror::Error;

/// Business errors for auth workflows. `Unauthorized` deliberately carries one
/// message for both unknown-user and wrong-password so the response does not
/// leak which field was wrong.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("this username already exists")]
    Conflict,
    #[error("incorrect username or password")]
    Unauthorized,
    #[error("access denied: no token provided")]
    MissingToken,
    #[error("invalid or expired token")]
    Forbidden,
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}
