//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod chat;
pub mod dispute;

pub use chat::{
    ChatError, ChatHandler, ChatReply, ChatRequest, FallbackResponder, ACTION_DISPUTE_CREATED,
    DEFAULT_AI_TIMEOUT,
};
pub use dispute::{
    bank_directory, dispute_guidance, CreateDisputeCommand, CreateDisputeHandler,
    CreateDisputeResult, DisputeDetail, DisputeError, DisputeList, DisputeSummary,
    GetDisputeHandler, GetDisputeQuery, ListDisputesHandler, ListDisputesQuery,
    UpdateDisputeStatusCommand, UpdateDisputeStatusHandler,
};
