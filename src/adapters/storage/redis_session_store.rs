//! Redis-backed session store for multi-node deployments.
//!
//! Sessions are stored as JSON under `dispute-assistant:session:{id}`.
//! Every write resets the key's expiry with `SET .. EX`, so idle expiry is
//! handled by Redis itself.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::chat::ChatSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

const KEY_PREFIX: &str = "dispute-assistant:session:";

#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self { conn, ttl }
    }

    /// Opens a multiplexed connection to `url`.
    pub async fn connect(url: &str, ttl: Duration) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(unavailable)?;
        Ok(Self::new(conn, ttl))
    }

    fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs().max(1)
    }

    async fn write(
        &self,
        id: &SessionId,
        session: ChatSession,
    ) -> Result<ChatSession, SessionStoreError> {
        let payload = serde_json::to_string(&session)?;
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(session_key(id))
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs())
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(session)
    }
}

fn session_key(id: &SessionId) -> String {
    format!("{}{}", KEY_PREFIX, id.as_str())
}

fn unavailable(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, id: &SessionId) -> Result<Option<ChatSession>, SessionStoreError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.get(session_key(id)).await.map_err(unavailable)?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, id: &SessionId) -> Result<ChatSession, SessionStoreError> {
        self.write(id, ChatSession::new(id.clone())).await
    }

    async fn update(
        &self,
        id: &SessionId,
        session: ChatSession,
    ) -> Result<ChatSession, SessionStoreError> {
        self.write(id, session).await
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(session_key(id)).await.map_err(unavailable)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_namespaced() {
        let id = SessionId::new("abc-123").unwrap();
        assert_eq!(session_key(&id), "dispute-assistant:session:abc-123");
    }

    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let result = RedisSessionStore::connect("not-a-url", Duration::from_secs(60)).await;
        assert!(matches!(result, Err(SessionStoreError::Unavailable(_))));
    }
}
