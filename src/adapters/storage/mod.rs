//! Storage Adapters
//!
//! Implementations of the `SessionStore` and `DisputeRepository` ports.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Process-local sessions with idle TTL and sweep task
//! - **RedisSessionStore** - Shared sessions with native key expiry
//! - **InMemoryDisputeRepository** - Dispute records in memory (testing/development)
//! - **PostgresDisputeRepository** - Dispute records in PostgreSQL
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemorySessionStore, PostgresDisputeRepository};
//!
//! let sessions = InMemorySessionStore::new(Duration::from_secs(1800));
//! let _sweeper = sessions.spawn_sweeper(Duration::from_secs(60));
//! let disputes = PostgresDisputeRepository::new(pool);
//! ```

mod in_memory_dispute_repository;
mod in_memory_session_store;
mod postgres_dispute_repository;
mod redis_session_store;

pub use in_memory_dispute_repository::InMemoryDisputeRepository;
pub use in_memory_session_store::{InMemorySessionStore, DEFAULT_SESSION_TTL};
pub use postgres_dispute_repository::PostgresDisputeRepository;
pub use redis_session_store::RedisSessionStore;
