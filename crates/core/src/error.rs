use crate::roster::SelectionError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Rider not found: {0}")]
    RiderNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
