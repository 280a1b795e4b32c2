//! WebSocket handler for real-time chat.
//!
//! # Connection Flow
//! 1. Client opens `GET /api/ws/{session_id}`
//! 2. Each text frame is a chat message JSON; the path session id wins over
//!    any id in the body
//! 3. Each reply is a chat response JSON on the same socket
//! 4. A frame that is not valid JSON gets a scripted retry reply
//!
//! Disconnecting needs no cleanup: the session stays at its last step.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};

use crate::application::{ChatReply, ChatRequest};
use crate::domain::chat::replies::{self, options, RETRY_OPTIONS};

use super::dto::{ChatMessageRequest, ChatResponse};
use super::handlers::ChatAppState;

/// Handle WebSocket upgrade for a chat session.
///
/// Route: `GET /api/ws/{session_id}`
pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<ChatAppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_chat_socket(socket, session_id, state))
}

async fn handle_chat_socket(socket: WebSocket, session_id: String, state: ChatAppState) {
    let (mut sender, mut receiver) = socket.split();

    tracing::info!(session_id = %session_id, "WebSocket connection established");

    while let Some(result) = receiver.next().await {
        let reply = match result {
            Ok(Message::Text(text)) => reply_to_frame(&state, &session_id, &text).await,
            Ok(Message::Close(_)) => {
                tracing::debug!(session_id = %session_id, "Client closed connection");
                break;
            }
            Ok(Message::Ping(data)) => {
                if sender.send(Message::Pong(data)).await.is_err() {
                    break;
                }
                continue;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(session_id = %session_id, error = %e, "WebSocket error");
                break;
            }
        };

        if send_reply(&mut sender, reply).await.is_err() {
            break;
        }
    }

    tracing::info!(session_id = %session_id, "WebSocket connection closed");
}

/// Parses one frame and runs it through the dialogue.
async fn reply_to_frame(state: &ChatAppState, session_id: &str, text: &str) -> ChatReply {
    match serde_json::from_str::<ChatMessageRequest>(text) {
        Ok(msg) => {
            let mut request: ChatRequest = msg.into();
            request.session_id = Some(session_id.to_string());
            state.process(request).await
        }
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "Malformed chat frame");
            malformed_frame_reply()
        }
    }
}

fn malformed_frame_reply() -> ChatReply {
    ChatReply {
        response: replies::technical_issue(),
        options: Some(options(&RETRY_OPTIONS)),
        ..Default::default()
    }
}

async fn send_reply<S>(sender: &mut S, reply: ChatReply) -> Result<(), S::Error>
where
    S: SinkExt<Message> + Unpin,
{
    let body = ChatResponse::from(reply);
    let json = match serde_json::to_string(&body) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize chat reply");
            return Ok(());
        }
    };
    sender.send(Message::Text(json)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::storage::{InMemoryDisputeRepository, InMemorySessionStore};
    use crate::application::{ChatHandler, FallbackResponder};
    use crate::domain::chat::ChatStep;
    use crate::domain::foundation::SessionId;
    use crate::ports::SessionStore;

    fn state() -> (ChatAppState, Arc<InMemorySessionStore>) {
        let sessions = Arc::new(InMemorySessionStore::default());
        let handler = ChatHandler::new(
            sessions.clone(),
            Arc::new(InMemoryDisputeRepository::new()),
            Arc::new(FallbackResponder::static_only()),
        );
        (ChatAppState::new(Arc::new(handler)), sessions)
    }

    #[tokio::test]
    async fn path_session_id_overrides_body() {
        let (state, sessions) = state();

        reply_to_frame(&state, "ws-1", r#"{"message":"hello","session_id":"other"}"#).await;

        let stored = sessions
            .get(&SessionId::new("ws-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.step, ChatStep::MainMenu);
        assert!(sessions
            .get(&SessionId::new("other").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn malformed_frame_gets_retry_options() {
        let (state, _) = state();

        let reply = reply_to_frame(&state, "ws-1", "not json").await;

        assert_eq!(reply.options, Some(options(&RETRY_OPTIONS)));
        assert!(reply.action.is_none());
    }
}
