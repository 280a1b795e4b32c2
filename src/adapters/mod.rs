//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM providers for free-text fallback replies
//! - `storage` - Session stores and dispute repositories
//! - `http` - axum REST and websocket surface

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{MockAIProvider, OllamaConfig, OllamaProvider, OpenAIConfig, OpenAIProvider};
pub use storage::{
    InMemoryDisputeRepository, InMemorySessionStore, PostgresDisputeRepository, RedisSessionStore,
};
