//! In-Memory Session Store Adapter
//!
//! Keeps chat sessions in a process-local map with an idle TTL.
//! Expired entries read as absent and are removed by a background sweep.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::domain::chat::ChatSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Default idle lifetime of a session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(1800);

#[derive(Debug, Clone)]
struct Entry {
    session: ChatSession,
    written_at: Instant,
}

/// In-memory session storage for single-node deployments and tests.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    ttl: Duration,
    unavailable: Arc<AtomicBool>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes every operation fail with `Unavailable` (for tests).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes expired entries. Returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let ttl = self.ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.written_at.elapsed() < ttl);
        before - sessions.len()
    }

    /// Runs `purge_expired` every `interval` until the handle is aborted.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.purge_expired().await;
                if removed > 0 {
                    tracing::debug!(removed, "Swept expired chat sessions");
                }
            }
        })
    }

    fn check_available(&self) -> Result<(), SessionStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SessionStoreError::Unavailable(
                "in-memory store disabled".to_string(),
            ));
        }
        Ok(())
    }

    async fn put(&self, id: &SessionId, session: ChatSession) -> ChatSession {
        let entry = Entry {
            session: session.clone(),
            written_at: Instant::now(),
        };
        self.sessions.write().await.insert(id.clone(), entry);
        session
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> Result<Option<ChatSession>, SessionStoreError> {
        self.check_available()?;
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(id)
            .filter(|entry| entry.written_at.elapsed() < self.ttl)
            .map(|entry| entry.session.clone()))
    }

    async fn create(&self, id: &SessionId) -> Result<ChatSession, SessionStoreError> {
        self.check_available()?;
        Ok(self.put(id, ChatSession::new(id.clone())).await)
    }

    async fn update(
        &self,
        id: &SessionId,
        session: ChatSession,
    ) -> Result<ChatSession, SessionStoreError> {
        self.check_available()?;
        Ok(self.put(id, session).await)
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
        self.check_available()?;
        Ok(self.sessions.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::ChatStep;

    fn sid(s: &str) -> SessionId {
        SessionId::new(s).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_returns_greeting_session() {
        let store = InMemorySessionStore::default();

        store.create(&sid("a")).await.unwrap();
        let loaded = store.get(&sid("a")).await.unwrap().unwrap();

        assert_eq!(loaded.step, ChatStep::Greeting);
        assert!(loaded.dispute_form.is_empty());
    }

    #[tokio::test]
    async fn unknown_session_is_none() {
        let store = InMemorySessionStore::default();
        assert!(store.get(&sid("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_overwrites() {
        let store = InMemorySessionStore::default();
        let mut session = store.create(&sid("a")).await.unwrap();
        session.advance_to(ChatStep::AmountInput);

        store.update(&sid("a"), session).await.unwrap();

        let loaded = store.get(&sid("a")).await.unwrap().unwrap();
        assert_eq!(loaded.step, ChatStep::AmountInput);
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let store = InMemorySessionStore::default();
        store.create(&sid("a")).await.unwrap();

        assert!(store.delete(&sid("a")).await.unwrap());
        assert!(!store.delete(&sid("a")).await.unwrap());
        assert!(store.get(&sid("a")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_session_reads_as_absent_and_is_purged() {
        let store = InMemorySessionStore::new(Duration::from_millis(20));
        store.create(&sid("a")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(store.get(&sid("a")).await.unwrap().is_none());
        assert_eq!(store.purge_expired().await, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn write_refreshes_ttl() {
        let store = InMemorySessionStore::new(Duration::from_millis(60));
        let session = store.create(&sid("a")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        store.update(&sid("a"), session).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(store.get(&sid("a")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn sweeper_removes_expired_entries() {
        let store = InMemorySessionStore::new(Duration::from_millis(10));
        store.create(&sid("a")).await.unwrap();

        let handle = store.spawn_sweeper(Duration::from_millis(15));
        tokio::time::sleep(Duration::from_millis(80)).await;
        handle.abort();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = InMemorySessionStore::default();
        store.set_unavailable(true);

        assert!(matches!(
            store.get(&sid("a")).await,
            Err(SessionStoreError::Unavailable(_))
        ));
        assert!(store.create(&sid("a")).await.is_err());
        assert!(store.delete(&sid("a")).await.is_err());

        store.set_unavailable(false);
        assert!(store.create(&sid("a")).await.is_ok());
    }
}
