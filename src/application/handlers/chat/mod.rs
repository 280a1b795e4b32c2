//! Chat handlers: the dialogue state machine and the AI fallback.

mod chat_handler;
mod errors;
mod fallback_responder;

pub use chat_handler::{ChatHandler, ChatReply, ChatRequest, ACTION_DISPUTE_CREATED};
pub use errors::ChatError;
pub use fallback_responder::{FallbackResponder, DEFAULT_AI_TIMEOUT};
