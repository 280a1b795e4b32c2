//! HTTP handlers for dispute endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::dispute_error_response;
use crate::application::{
    CreateDisputeCommand, CreateDisputeHandler, DisputeDetail, GetDisputeHandler,
    GetDisputeQuery, ListDisputesHandler, ListDisputesQuery, UpdateDisputeStatusCommand,
    UpdateDisputeStatusHandler,
};
use crate::ports::DisputeRepository;

use super::dto::{
    CreateDisputeRequest, CreateDisputeResponse, DisputeDetailResponse, DisputeListResponse,
    ListDisputesParams, UpdateStatusRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DisputeHandlers {
    create_handler: Arc<CreateDisputeHandler>,
    get_handler: Arc<GetDisputeHandler>,
    list_handler: Arc<ListDisputesHandler>,
    update_status_handler: Arc<UpdateDisputeStatusHandler>,
}

impl DisputeHandlers {
    /// Builds every dispute handler over one repository.
    pub fn new(repository: Arc<dyn DisputeRepository>) -> Self {
        Self {
            create_handler: Arc::new(CreateDisputeHandler::new(repository.clone())),
            get_handler: Arc::new(GetDisputeHandler::new(repository.clone())),
            list_handler: Arc::new(ListDisputesHandler::new(repository.clone())),
            update_status_handler: Arc::new(UpdateDisputeStatusHandler::new(repository)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/dispute - File a dispute from a complete form
pub async fn create_dispute(
    State(handlers): State<DisputeHandlers>,
    Json(req): Json<CreateDisputeRequest>,
) -> Response {
    let form = match req.into_form() {
        Ok(form) => form,
        Err(e) => return dispute_error_response(e.into()),
    };

    match handlers
        .create_handler
        .handle(CreateDisputeCommand { form })
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(CreateDisputeResponse::from(result)),
        )
            .into_response(),
        Err(e) => dispute_error_response(e),
    }
}

/// GET /api/dispute/:id - Dispute with timeline and progress
pub async fn get_dispute(
    State(handlers): State<DisputeHandlers>,
    Path(dispute_id): Path<String>,
) -> Response {
    match handlers
        .get_handler
        .handle(GetDisputeQuery { dispute_id })
        .await
    {
        Ok(detail) => (StatusCode::OK, Json(DisputeDetailResponse::from(detail))).into_response(),
        Err(e) => dispute_error_response(e),
    }
}

/// GET /api/disputes - Filtered listing with summary counts
pub async fn list_disputes(
    State(handlers): State<DisputeHandlers>,
    Query(params): Query<ListDisputesParams>,
) -> Response {
    let query = ListDisputesQuery {
        status: params.status,
        bank: params.bank,
    };

    match handlers.list_handler.handle(query).await {
        Ok(list) => (StatusCode::OK, Json(DisputeListResponse::from(list))).into_response(),
        Err(e) => dispute_error_response(e),
    }
}

/// PATCH /api/dispute/:id/status - Move a dispute forward
pub async fn update_dispute_status(
    State(handlers): State<DisputeHandlers>,
    Path(dispute_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let cmd = UpdateDisputeStatusCommand {
        dispute_id,
        status: req.status,
    };

    match handlers.update_status_handler.handle(cmd).await {
        Ok(record) => (
            StatusCode::OK,
            Json(DisputeDetailResponse::from(DisputeDetail::from(record))),
        )
            .into_response(),
        Err(e) => dispute_error_response(e),
    }
}
