//! Dispute handler errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by dispute command and query handlers.
#[derive(Debug, Error)]
pub enum DisputeError {
    /// Caller input was malformed.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No record with this ID.
    #[error("dispute not found: {0}")]
    NotFound(String),

    /// Requested status change is not a forward move.
    #[error("invalid status change: {0}")]
    InvalidTransition(String),

    /// Storage backend failed.
    #[error("persistence failure: {0}")]
    Persistence(DomainError),
}

impl DisputeError {
    pub fn not_found(id: impl Into<String>) -> Self {
        DisputeError::NotFound(id.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DisputeError::Validation(_) => ErrorCode::ValidationFailed,
            DisputeError::NotFound(_) => ErrorCode::DisputeNotFound,
            DisputeError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            DisputeError::Persistence(err) => err.code,
        }
    }
}

impl From<DomainError> for DisputeError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DisputeNotFound => DisputeError::NotFound(err.message),
            ErrorCode::InvalidStateTransition => DisputeError::InvalidTransition(err.message),
            ErrorCode::ValidationFailed | ErrorCode::InvalidFormat => {
                DisputeError::Validation(ValidationError::invalid_format("request", err.message))
            }
            _ => DisputeError::Persistence(err),
        }
    }
}
