//! Dispute repository port.
//!
//! Owns dispute records after the chat handoff. Records are never deleted;
//! status only moves forward.

use async_trait::async_trait;

use crate::domain::dispute::{DisputeRecord, DisputeStatus};
use crate::domain::foundation::{DisputeId, DomainError};

/// Optional filters for listing disputes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisputeFilter {
    /// Exact status match.
    pub status: Option<DisputeStatus>,
    /// Case-insensitive bank name match.
    pub bank: Option<String>,
}

impl DisputeFilter {
    pub fn with_status(mut self, status: DisputeStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = Some(bank.into());
        self
    }

    /// In-process evaluation, shared by backends that cannot filter natively.
    pub fn matches(&self, record: &DisputeRecord) -> bool {
        let status_ok = self.status.map_or(true, |s| record.status == s);
        let bank_ok = self
            .bank
            .as_deref()
            .map_or(true, |b| record.bank.name().eq_ignore_ascii_case(b.trim()));
        status_ok && bank_ok
    }
}

/// Repository port for dispute records.
#[async_trait]
pub trait DisputeRepository: Send + Sync {
    /// Persist a new record.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, record: &DisputeRecord) -> Result<(), DomainError>;

    /// Find a record by ID. Returns `None` if not found.
    async fn get(&self, id: &DisputeId) -> Result<Option<DisputeRecord>, DomainError>;

    /// Records matching the filter, newest first.
    async fn list(&self, filter: &DisputeFilter) -> Result<Vec<DisputeRecord>, DomainError>;

    /// Move a record to a new status.
    ///
    /// # Errors
    ///
    /// - `DisputeNotFound` if the record doesn't exist
    /// - `InvalidStateTransition` if the move is not forward
    /// - `DatabaseError` on persistence failure
    async fn update_status(
        &self,
        id: &DisputeId,
        status: DisputeStatus,
    ) -> Result<DisputeRecord, DomainError>;
}
