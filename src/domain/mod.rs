//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `dispute` - Dispute categories, banks, priority, status lifecycle and guidance
//! - `chat` - Dialogue steps, session state, field extractors and reply texts

pub mod chat;
pub mod dispute;
pub mod foundation;
