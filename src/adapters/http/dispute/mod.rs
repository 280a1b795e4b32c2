//! HTTP adapter for dispute endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateDisputeRequest, CreateDisputeResponse, DisputeDetailResponse, DisputeListResponse,
    ListDisputesParams, UpdateStatusRequest,
};
pub use handlers::DisputeHandlers;
pub use routes::dispute_routes;
