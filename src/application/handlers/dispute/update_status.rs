//! UpdateDisputeStatusHandler - Command handler for moving a dispute forward.

use std::sync::Arc;

use crate::domain::dispute::{DisputeRecord, DisputeStatus};
use crate::domain::foundation::{DisputeId, ValidationError};
use crate::ports::DisputeRepository;

use super::DisputeError;

/// Command to change a dispute's status.
#[derive(Debug, Clone)]
pub struct UpdateDisputeStatusCommand {
    pub dispute_id: String,
    pub status: String,
}

/// Handler for status changes.
pub struct UpdateDisputeStatusHandler {
    repository: Arc<dyn DisputeRepository>,
}

impl UpdateDisputeStatusHandler {
    pub fn new(repository: Arc<dyn DisputeRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDisputeStatusCommand,
    ) -> Result<DisputeRecord, DisputeError> {
        let id = DisputeId::parse(&cmd.dispute_id)?;
        let status = DisputeStatus::parse(&cmd.status.to_lowercase())
            .ok_or_else(|| ValidationError::not_recognized("status", cmd.status.as_str()))?;

        let record = self.repository.update_status(&id, status).await?;

        tracing::info!(dispute_id = %record.id, status = %record.status.as_str(), "Dispute status changed");

        Ok(record)
    }
}
