//! Session store port.
//!
//! Keyed storage of per-conversation state. Writes are full overwrites with
//! no optimistic-concurrency check; callers serialize messages per session.
//!
//! A store that expires sessions must make an expired session look exactly
//! like a deleted one: `get` returns `None` and the next message re-creates it.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::ChatSession;
use crate::domain::foundation::SessionId;

/// Errors raised by session store backends.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Backend could not be reached or rejected the command.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// Stored bytes could not be encoded or decoded.
    #[error("session serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SessionStoreError {
    fn from(err: serde_json::Error) -> Self {
        SessionStoreError::Serialization(err.to_string())
    }
}

/// Port for chat session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session, or `None` if unknown or expired.
    async fn get(&self, id: &SessionId) -> Result<Option<ChatSession>, SessionStoreError>;

    /// Stores and returns a fresh session at `greeting`, replacing any
    /// existing entry.
    async fn create(&self, id: &SessionId) -> Result<ChatSession, SessionStoreError>;

    /// Overwrites the stored session.
    async fn update(
        &self,
        id: &SessionId,
        session: ChatSession,
    ) -> Result<ChatSession, SessionStoreError>;

    /// Removes the session. Returns whether one existed.
    async fn delete(&self, id: &SessionId) -> Result<bool, SessionStoreError>;
}
