//! Dispute command and query handlers.

mod create_dispute;
mod errors;
mod get_dispute;
mod list_disputes;
mod reference;
mod update_status;

pub use create_dispute::{CreateDisputeCommand, CreateDisputeHandler, CreateDisputeResult};
pub use errors::DisputeError;
pub use get_dispute::{DisputeDetail, GetDisputeHandler, GetDisputeQuery};
pub use list_disputes::{DisputeList, DisputeSummary, ListDisputesHandler, ListDisputesQuery};
pub use reference::{bank_directory, dispute_guidance};
pub use update_status::{UpdateDisputeStatusCommand, UpdateDisputeStatusHandler};
