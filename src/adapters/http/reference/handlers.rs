//! HTTP handlers for static reference data: guidance catalog and banks.

use axum::{extract::Path, Json};
use serde::Serialize;

use crate::application::{bank_directory, dispute_guidance};
use crate::domain::dispute::{BankInfo, DisputeGuidance};

#[derive(Debug, Clone, Serialize)]
pub struct BankListResponse {
    pub banks: Vec<BankInfo>,
}

/// POST /api/guidance/:dispute_type - Steps, template and limits for a type
///
/// Unknown types get the generic entry rather than an error.
pub async fn get_guidance(Path(dispute_type): Path<String>) -> Json<DisputeGuidance> {
    Json(dispute_guidance(&dispute_type))
}

/// GET /api/banks - Supported banks with contact details
pub async fn list_banks() -> Json<BankListResponse> {
    Json(BankListResponse {
        banks: bank_directory(),
    })
}
