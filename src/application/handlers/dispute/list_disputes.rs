//! ListDisputesHandler - Query handler for filtered dispute listings.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::dispute::{DisputeRecord, DisputeStatus, Priority};
use crate::domain::foundation::ValidationError;
use crate::ports::{DisputeFilter, DisputeRepository};

use super::DisputeError;

/// Query with optional raw filter values from the caller.
#[derive(Debug, Clone, Default)]
pub struct ListDisputesQuery {
    pub status: Option<String>,
    pub bank: Option<String>,
}

/// Counts by status and by priority. Every known key is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisputeSummary {
    pub by_status: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
}

impl DisputeSummary {
    pub fn from_records(records: &[DisputeRecord]) -> Self {
        let mut by_status: BTreeMap<String, usize> = DisputeStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut by_priority: BTreeMap<String, usize> = Priority::ALL
            .iter()
            .map(|p| (p.as_str().to_string(), 0))
            .collect();

        for record in records {
            *by_status.entry(record.status.as_str().to_string()).or_default() += 1;
            *by_priority.entry(record.priority.as_str().to_string()).or_default() += 1;
        }

        Self {
            by_status,
            by_priority,
        }
    }
}

/// Listing result. `summary` always covers every stored dispute.
#[derive(Debug, Clone)]
pub struct DisputeList {
    pub disputes: Vec<DisputeRecord>,
    pub total: usize,
    pub summary: DisputeSummary,
}

/// Handler for listing disputes.
pub struct ListDisputesHandler {
    repository: Arc<dyn DisputeRepository>,
}

impl ListDisputesHandler {
    pub fn new(repository: Arc<dyn DisputeRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListDisputesQuery) -> Result<DisputeList, DisputeError> {
        let mut filter = DisputeFilter::default();

        if let Some(raw) = query.status.as_deref().filter(|s| !s.trim().is_empty()) {
            let status = DisputeStatus::parse(&raw.to_lowercase())
                .ok_or_else(|| ValidationError::not_recognized("status", raw))?;
            filter = filter.with_status(status);
        }
        if let Some(bank) = query.bank.filter(|b| !b.trim().is_empty()) {
            filter = filter.with_bank(bank);
        }

        let disputes = self.repository.list(&filter).await?;
        let summary = if filter == DisputeFilter::default() {
            DisputeSummary::from_records(&disputes)
        } else {
            DisputeSummary::from_records(&self.repository.list(&DisputeFilter::default()).await?)
        };

        Ok(DisputeList {
            total: disputes.len(),
            disputes,
            summary,
        })
    }
}
