//! CreateDisputeHandler - Turns a completed form into a persisted record.
//!
//! This is the single handoff point between the chat flow (or the direct
//! HTTP endpoint) and dispute storage.

use std::sync::Arc;

use crate::domain::dispute::{
    estimated_resolution, guidance, DisputeForm, DisputeRecord, GuidanceStep,
};
use crate::ports::DisputeRepository;

use super::DisputeError;

/// Command to create a dispute.
#[derive(Debug, Clone)]
pub struct CreateDisputeCommand {
    pub form: DisputeForm,
}

/// Result of successful dispute creation.
#[derive(Debug, Clone)]
pub struct CreateDisputeResult {
    pub record: DisputeRecord,
    pub next_steps: Vec<GuidanceStep>,
    pub estimated_resolution: &'static str,
    pub bank_contact: &'static str,
}

/// Handler for creating disputes.
pub struct CreateDisputeHandler {
    repository: Arc<dyn DisputeRepository>,
}

impl CreateDisputeHandler {
    pub fn new(repository: Arc<dyn DisputeRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateDisputeCommand,
    ) -> Result<CreateDisputeResult, DisputeError> {
        cmd.form.validate()?;

        let record = DisputeRecord::submit(cmd.form);

        self.repository
            .create(&record)
            .await
            .map_err(DisputeError::Persistence)?;

        tracing::info!(
            dispute_id = %record.id,
            dispute_type = %record.dispute_type,
            priority = %record.priority,
            "Dispute created"
        );

        Ok(CreateDisputeResult {
            next_steps: guidance::guidance_steps(Some(record.dispute_type)),
            estimated_resolution: estimated_resolution(record.priority, record.dispute_type),
            bank_contact: record.bank.contact(),
            record,
        })
    }
}
