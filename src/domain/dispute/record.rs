//! Dispute form and persisted dispute record.

use serde::{Deserialize, Serialize};

use super::{Bank, DisputeStatus, DisputeType, Priority};
use crate::domain::foundation::{DisputeId, Timestamp, ValidationError};

/// Sentinel stored when the dispute does not involve a card.
pub const NO_CARD: &str = "N/A";

/// A fully populated, validated dispute form: the input to dispute creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputeForm {
    #[serde(rename = "type")]
    pub dispute_type: DisputeType,
    pub bank: Bank,
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub card_last_four: String,
}

impl DisputeForm {
    /// Builds a form, enforcing the invariants every record relies on.
    pub fn new(
        dispute_type: DisputeType,
        bank: Bank,
        amount: f64,
        date: impl Into<String>,
        description: impl Into<String>,
        card_last_four: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let form = Self {
            dispute_type,
            bank,
            amount,
            date: date.into(),
            description: description.into(),
            card_last_four: card_last_four.into(),
        };
        form.validate()?;
        Ok(form)
    }

    /// Checks a form that arrived from outside (e.g. deserialized JSON).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::invalid_format(
                "amount",
                "must be a positive number",
            ));
        }
        if self.date.trim().is_empty() {
            return Err(ValidationError::empty_field("date"));
        }
        if self.card_last_four.trim().is_empty() {
            return Err(ValidationError::empty_field("card_last_four"));
        }
        if self.card_last_four != NO_CARD && self.card_last_four.chars().count() > 4 {
            return Err(ValidationError::invalid_format(
                "card_last_four",
                "expected 4 characters or N/A",
            ));
        }
        Ok(())
    }
}

/// One step in a dispute's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: Timestamp,
    pub status: String,
    pub description: String,
}

impl TimelineEntry {
    fn new(date: Timestamp, status: &str, description: &str) -> Self {
        Self {
            date,
            status: status.to_string(),
            description: description.to_string(),
        }
    }
}

/// A persisted dispute. The `id` never changes once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputeRecord {
    pub id: DisputeId,
    #[serde(rename = "type")]
    pub dispute_type: DisputeType,
    pub bank: Bank,
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub card_last_four: String,
    pub status: DisputeStatus,
    pub priority: Priority,
    pub created_at: Timestamp,
}

impl DisputeRecord {
    /// Creates a new `submitted` record with a fresh id and derived priority.
    pub fn submit(form: DisputeForm) -> Self {
        let priority = Priority::derive(form.dispute_type, form.amount);
        Self {
            id: DisputeId::generate(),
            dispute_type: form.dispute_type,
            bank: form.bank,
            amount: form.amount,
            date: form.date,
            description: form.description,
            card_last_four: form.card_last_four,
            status: DisputeStatus::Submitted,
            priority,
            created_at: Timestamp::now(),
        }
    }

    /// Status history derived from the creation time and current status.
    ///
    /// Always starts with the `Submitted` entry.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let base = self.created_at;
        let mut timeline = vec![
            TimelineEntry::new(base, "Submitted", "Dispute submitted successfully"),
            TimelineEntry::new(base.plus_hours(2), "Acknowledged", "Bank acknowledged receipt"),
        ];

        if matches!(
            self.status,
            DisputeStatus::UnderReview | DisputeStatus::Resolved
        ) {
            timeline.push(TimelineEntry::new(
                base.plus_days(1),
                "Under Review",
                "Investigation started",
            ));
        }
        if self.status == DisputeStatus::Escalated {
            timeline.push(TimelineEntry::new(
                base.plus_days(3),
                "Escalated",
                "Dispute escalated for senior review",
            ));
        }
        if self.status == DisputeStatus::Resolved {
            timeline.push(TimelineEntry::new(
                base.plus_days(5),
                "Resolved",
                "Dispute resolved successfully",
            ));
        }
        timeline
    }

    /// Expected completion date, `YYYY-MM-DD`.
    pub fn estimated_completion(&self) -> String {
        self.created_at
            .plus_days(self.priority.resolution_days())
            .date_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(dispute_type: DisputeType, amount: f64) -> DisputeForm {
        DisputeForm::new(
            dispute_type,
            Bank::Hdfc,
            amount,
            "2024-01-15",
            "charged twice",
            "1234",
        )
        .unwrap()
    }

    #[test]
    fn form_rejects_non_positive_amount() {
        let result = DisputeForm::new(DisputeType::Other, Bank::Hdfc, 0.0, "2024-01-15", "x", "1234");
        assert!(result.is_err());
        let result = DisputeForm::new(DisputeType::Other, Bank::Hdfc, f64::NAN, "2024-01-15", "x", "1234");
        assert!(result.is_err());
    }

    #[test]
    fn form_accepts_no_card_sentinel() {
        let result = DisputeForm::new(DisputeType::Other, Bank::Hdfc, 10.0, "2024-01-15", "", NO_CARD);
        assert!(result.is_ok());
    }

    #[test]
    fn form_rejects_long_card_value() {
        let result = DisputeForm::new(DisputeType::Other, Bank::Hdfc, 10.0, "2024-01-15", "", "123456");
        assert!(result.is_err());
    }

    #[test]
    fn submit_sets_initial_state() {
        let record = DisputeRecord::submit(form(DisputeType::Unauthorized, 100.0));
        assert_eq!(record.status, DisputeStatus::Submitted);
        assert_eq!(record.priority, Priority::High);
        assert!(record.id.as_str().starts_with("DSP"));
    }

    #[test]
    fn timeline_starts_with_submitted() {
        let record = DisputeRecord::submit(form(DisputeType::Other, 100.0));
        let timeline = record.timeline();
        assert_eq!(timeline[0].status, "Submitted");
        assert_eq!(timeline.len(), 2);
    }

    #[test]
    fn resolved_timeline_has_all_entries() {
        let mut record = DisputeRecord::submit(form(DisputeType::Other, 100.0));
        record.status = DisputeStatus::Resolved;
        let statuses: Vec<_> = record.timeline().into_iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec!["Submitted", "Acknowledged", "Under Review", "Resolved"]
        );
    }

    #[test]
    fn estimated_completion_uses_priority_days() {
        let record = DisputeRecord::submit(form(DisputeType::Other, 100.0));
        let expected = record.created_at.plus_days(10).date_string();
        assert_eq!(record.estimated_completion(), expected);
    }

    #[test]
    fn record_serializes_type_field() {
        let record = DisputeRecord::submit(form(DisputeType::AtmDispute, 100.0));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "ATM Dispute");
        assert_eq!(json["status"], "submitted");
        assert_eq!(json["bank"], "HDFC Bank");
    }
}
