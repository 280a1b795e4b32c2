//! DTOs for dispute endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{CreateDisputeResult, DisputeDetail, DisputeList, DisputeSummary};
use crate::domain::dispute::{
    Bank, DisputeForm, DisputeRecord, DisputeType, GuidanceStep, TimelineEntry,
};
use crate::domain::foundation::ValidationError;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to file a dispute directly, bypassing the chat flow.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDisputeRequest {
    #[serde(rename = "type")]
    pub dispute_type: String,
    pub bank: String,
    pub amount: f64,
    pub date: String,
    pub description: String,
    #[serde(alias = "cardlastfour")]
    pub card_last_four: String,
}

impl CreateDisputeRequest {
    /// Resolves labels and validates the form.
    pub fn into_form(self) -> Result<DisputeForm, ValidationError> {
        let dispute_type = DisputeType::from_label(&self.dispute_type)
            .ok_or_else(|| ValidationError::not_recognized("type", self.dispute_type.as_str()))?;
        let bank = Bank::from_name(&self.bank)
            .ok_or_else(|| ValidationError::not_recognized("bank", self.bank.as_str()))?;

        DisputeForm::new(
            dispute_type,
            bank,
            self.amount,
            self.date.trim(),
            self.description.trim(),
            self.card_last_four.trim(),
        )
    }
}

/// Query parameters for listing disputes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDisputesParams {
    pub status: Option<String>,
    pub bank: Option<String>,
}

/// Request to move a dispute to a new status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for successful dispute creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDisputeResponse {
    pub dispute_id: String,
    pub status: String,
    pub priority: String,
    pub next_steps: Vec<GuidanceStep>,
    pub estimated_resolution: String,
    pub bank_contact: String,
    pub created_at: String,
}

impl From<CreateDisputeResult> for CreateDisputeResponse {
    fn from(result: CreateDisputeResult) -> Self {
        Self {
            dispute_id: result.record.id.to_string(),
            status: result.record.status.as_str().to_string(),
            priority: result.record.priority.as_str().to_string(),
            next_steps: result.next_steps,
            estimated_resolution: result.estimated_resolution.to_string(),
            bank_contact: result.bank_contact.to_string(),
            created_at: result.record.created_at.to_rfc3339(),
        }
    }
}

/// Dispute with tracking information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisputeDetailResponse {
    pub dispute: DisputeRecord,
    pub timeline: Vec<TimelineEntry>,
    pub progress_percentage: u8,
    pub next_action: String,
    pub estimated_completion: String,
}

impl From<DisputeDetail> for DisputeDetailResponse {
    fn from(detail: DisputeDetail) -> Self {
        Self {
            dispute: detail.dispute,
            timeline: detail.timeline,
            progress_percentage: detail.progress_percentage,
            next_action: detail.next_action.to_string(),
            estimated_completion: detail.estimated_completion,
        }
    }
}

/// Filtered dispute listing.
#[derive(Debug, Clone, Serialize)]
pub struct DisputeListResponse {
    pub disputes: Vec<DisputeRecord>,
    pub total: usize,
    pub summary: DisputeSummary,
}

impl From<DisputeList> for DisputeListResponse {
    fn from(list: DisputeList) -> Self {
        Self {
            disputes: list.disputes,
            total: list.total,
            summary: list.summary,
        }
    }
}
