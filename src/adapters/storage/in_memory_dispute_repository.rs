//! In-memory dispute repository.
//!
//! Development and test backend. Write failures can be injected to exercise
//! the persistence-error paths of the chat flow.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dispute::{DisputeRecord, DisputeStatus};
use crate::domain::foundation::{DisputeId, DomainError, ErrorCode, StateMachine};
use crate::ports::{DisputeFilter, DisputeRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryDisputeRepository {
    records: Arc<RwLock<HashMap<DisputeId, DisputeRecord>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryDisputeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `create` and `update_status` fail with a database error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("dispute store rejected the write"));
        }
        Ok(())
    }
}

#[async_trait]
impl DisputeRepository for InMemoryDisputeRepository {
    async fn create(&self, record: &DisputeRecord) -> Result<(), DomainError> {
        self.check_writable()?;

        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(DomainError::database(format!(
                "Dispute already exists: {}",
                record.id
            )));
        }
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &DisputeId) -> Result<Option<DisputeRecord>, DomainError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list(&self, filter: &DisputeFilter) -> Result<Vec<DisputeRecord>, DomainError> {
        let records = self.records.read().await;
        let mut matching: Vec<DisputeRecord> = records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn update_status(
        &self,
        id: &DisputeId,
        status: DisputeStatus,
    ) -> Result<DisputeRecord, DomainError> {
        self.check_writable()?;

        let mut records = self.records.write().await;
        let record = records.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DisputeNotFound,
                format!("Dispute not found: {}", id),
            )
        })?;

        record.status = record.status.transition_to(status).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("dispute_id", id.as_str())
        })?;

        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dispute::{Bank, DisputeForm, DisputeType};

    fn record(bank: Bank) -> DisputeRecord {
        DisputeRecord::submit(
            DisputeForm::new(DisputeType::FailedTransaction, bank, 750.0, "2024-02-01", "x", "N/A")
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn create_and_get() {
        let repo = InMemoryDisputeRepository::new();
        let r = record(Bank::Icici);

        repo.create(&r).await.unwrap();

        assert_eq!(repo.get(&r.id).await.unwrap(), Some(r));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = InMemoryDisputeRepository::new();
        let r = record(Bank::Icici);
        repo.create(&r).await.unwrap();

        assert!(repo.create(&r).await.is_err());
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filtered() {
        let repo = InMemoryDisputeRepository::new();
        let older = record(Bank::Axis);
        let mut newer = record(Bank::Axis);
        newer.created_at = older.created_at.plus_hours(1);
        let other_bank = record(Bank::Hdfc);
        repo.create(&older).await.unwrap();
        repo.create(&newer).await.unwrap();
        repo.create(&other_bank).await.unwrap();

        let listed = repo
            .list(&DisputeFilter::default().with_bank("Axis Bank"))
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }

    #[tokio::test]
    async fn update_status_moves_forward_only() {
        let repo = InMemoryDisputeRepository::new();
        let r = record(Bank::Canara);
        repo.create(&r).await.unwrap();

        let updated = repo
            .update_status(&r.id, DisputeStatus::UnderReview)
            .await
            .unwrap();
        assert_eq!(updated.status, DisputeStatus::UnderReview);

        let err = repo
            .update_status(&r.id, DisputeStatus::Submitted)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn update_status_unknown_id() {
        let repo = InMemoryDisputeRepository::new();
        let err = repo
            .update_status(&DisputeId::generate(), DisputeStatus::Resolved)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DisputeNotFound);
    }

    #[tokio::test]
    async fn injected_failure_blocks_writes_only() {
        let repo = InMemoryDisputeRepository::new();
        let r = record(Bank::Other);
        repo.create(&r).await.unwrap();
        repo.set_fail_writes(true);

        let err = repo.create(&record(Bank::Other)).await.unwrap_err();
        assert!(err.is_infrastructure());
        assert!(repo.get(&r.id).await.unwrap().is_some());
        assert_eq!(repo.len().await, 1);
    }
}
