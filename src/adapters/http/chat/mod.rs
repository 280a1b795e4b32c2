//! HTTP adapter for the chat endpoints.

mod dto;
mod handlers;
mod routes;
mod websocket;

pub use dto::{ChatMessageRequest, ChatResponse};
pub use handlers::{ChatAppState, SessionLocks};
pub use routes::chat_routes;
