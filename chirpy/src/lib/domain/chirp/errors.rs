use thiserror::Error;

use crate::domain::chirp::models::ChirpId;
use crate::domain::user::models::UserId;

/// Error type for ChirpId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpIdError {
    #[error("Invalid chirp ID")]
    InvalidFormat(String),
}

/// Error type for ChirpBody validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChirpBodyError {
    #[error("Chirp body is required")]
    Empty,

    #[error("Chirp is too long")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all chirp-related operations
#[derive(Debug, Error)]
pub enum ChirpError {
    #[error("{0}")]
    InvalidChirpId(#[from] ChirpIdError),

    #[error("{0}")]
    InvalidBody(#[from] ChirpBodyError),

    // Domain-level errors
    #[error("Chirp not found")]
    NotFound(ChirpId),

    #[error("Author not found: {0}")]
    AuthorNotFound(UserId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
