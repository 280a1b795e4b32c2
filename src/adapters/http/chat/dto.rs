//! DTOs for the chat endpoints.
//!
//! These types define the wire shape of chat messages for both the REST and
//! the websocket channel.

use serde::{Deserialize, Serialize};

use crate::application::{ChatReply, ChatRequest};
use crate::domain::chat::ChatContext;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Inbound chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Caller-supplied context; `null` is treated as empty.
    #[serde(default)]
    pub context: Option<ChatContext>,
}

impl From<ChatMessageRequest> for ChatRequest {
    fn from(req: ChatMessageRequest) -> Self {
        ChatRequest {
            message: req.message,
            session_id: req.session_id,
            context: req.context.unwrap_or_default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Outbound chat reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispute_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ChatContext>,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            response: reply.response,
            options: reply.options,
            action: reply.action,
            dispute_id: reply.dispute_id,
            context: reply.context,
        }
    }
}
