//! Chat handler errors.
//!
//! Only persistence failures escape a dialogue step. Validation problems
//! are answered with a re-prompt and never become a `ChatError`.

use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::ports::SessionStoreError;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Session could not be read or written.
    #[error("session persistence failed: {0}")]
    SessionPersistence(#[from] SessionStoreError),

    /// Dispute store failed during a lookup.
    #[error("dispute persistence failed: {0}")]
    DisputePersistence(#[from] DomainError),
}
