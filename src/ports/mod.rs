//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Per-conversation chat state
//! - `DisputeRepository` - Persisted dispute records
//! - `AIProvider` - LLM backend for open-ended replies

mod ai_provider;
mod dispute_repository;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use dispute_repository::{DisputeFilter, DisputeRepository};
pub use session_store::{SessionStore, SessionStoreError};
