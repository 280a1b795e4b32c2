//! GetDisputeHandler - Query handler for dispute detail with timeline.

use std::sync::Arc;

use crate::domain::dispute::{DisputeRecord, TimelineEntry};
use crate::domain::foundation::DisputeId;
use crate::ports::DisputeRepository;

use super::DisputeError;

/// Query for one dispute by its customer-facing ID.
#[derive(Debug, Clone)]
pub struct GetDisputeQuery {
    pub dispute_id: String,
}

/// Dispute plus derived tracking information.
#[derive(Debug, Clone)]
pub struct DisputeDetail {
    pub dispute: DisputeRecord,
    pub timeline: Vec<TimelineEntry>,
    pub progress_percentage: u8,
    pub next_action: &'static str,
    pub estimated_completion: String,
}

impl From<DisputeRecord> for DisputeDetail {
    fn from(dispute: DisputeRecord) -> Self {
        Self {
            timeline: dispute.timeline(),
            progress_percentage: dispute.status.progress_percentage(),
            next_action: dispute.status.next_action(),
            estimated_completion: dispute.estimated_completion(),
            dispute,
        }
    }
}

/// Handler for retrieving dispute details.
pub struct GetDisputeHandler {
    repository: Arc<dyn DisputeRepository>,
}

impl GetDisputeHandler {
    pub fn new(repository: Arc<dyn DisputeRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetDisputeQuery) -> Result<DisputeDetail, DisputeError> {
        let id = DisputeId::parse(&query.dispute_id)?;

        let dispute = self
            .repository
            .get(&id)
            .await?
            .ok_or_else(|| DisputeError::not_found(id.as_str()))?;

        Ok(dispute.into())
    }
}
