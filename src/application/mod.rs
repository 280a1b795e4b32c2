//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (dispute creation, status changes, the chat dialogue)
//! are kept apart from query handlers (dispute detail, listings, reference data).

pub mod handlers;

pub use handlers::{
    // Chat
    ChatError, ChatHandler, ChatReply, ChatRequest, FallbackResponder,
    ACTION_DISPUTE_CREATED, DEFAULT_AI_TIMEOUT,
    // Disputes
    bank_directory, dispute_guidance, CreateDisputeCommand, CreateDisputeHandler,
    CreateDisputeResult, DisputeDetail, DisputeError, DisputeList, DisputeSummary,
    GetDisputeHandler, GetDisputeQuery, ListDisputesHandler, ListDisputesQuery,
    UpdateDisputeStatusCommand, UpdateDisputeStatusHandler,
};
