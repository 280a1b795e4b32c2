//! HTTP handlers for the chat endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::application::{ChatHandler, ChatReply, ChatRequest};
use crate::domain::chat::replies::{self, options, RETRY_OPTIONS};

use super::dto::{ChatMessageRequest, ChatResponse};

// ════════════════════════════════════════════════════════════════════════════
// Per-session serialization
// ════════════════════════════════════════════════════════════════════════════

/// One async mutex per session id, so at most one message per session runs
/// through the dialogue at a time. Idle entries are pruned on acquisition.
#[derive(Clone, Default)]
pub struct SessionLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl SessionLocks {
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(session_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of sessions currently holding or waiting on a lock.
    pub async fn active(&self) -> usize {
        let locks = self.inner.lock().await;
        locks.values().filter(|l| Arc::strong_count(l) > 1).count()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatAppState {
    handler: Arc<ChatHandler>,
    locks: SessionLocks,
}

impl ChatAppState {
    pub fn new(handler: Arc<ChatHandler>) -> Self {
        Self {
            handler,
            locks: SessionLocks::default(),
        }
    }

    /// Runs one message through the dialogue under its session lock.
    ///
    /// The work runs on its own task, so a dropped connection cannot stop a
    /// dispute handoff between storing the record and deleting the session.
    pub async fn process(&self, request: ChatRequest) -> ChatReply {
        let state = self.clone();
        match tokio::spawn(async move { state.process_locked(request).await }).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Chat task failed");
                ChatReply {
                    response: replies::technical_issue(),
                    options: Some(options(&RETRY_OPTIONS)),
                    ..Default::default()
                }
            }
        }
    }

    async fn process_locked(&self, request: ChatRequest) -> ChatReply {
        let _guard = match request
            .session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(id) => Some(self.locks.acquire(id).await),
            None => None,
        };

        self.handler.handle(request).await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Process one chat message
///
/// Always 200: dialogue failures come back as scripted replies.
pub async fn chat(
    State(state): State<ChatAppState>,
    Json(req): Json<ChatMessageRequest>,
) -> Response {
    let reply = state.process(req.into()).await;
    (StatusCode::OK, Json(ChatResponse::from(reply))).into_response()
}
