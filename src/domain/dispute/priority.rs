//! Priority derivation for new disputes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DisputeType;

/// Amount above which any dispute is high priority.
pub const HIGH_AMOUNT_THRESHOLD: f64 = 50_000.0;

/// Amount above which any dispute is at least medium priority.
pub const MEDIUM_AMOUNT_THRESHOLD: f64 = 10_000.0;

/// Handling priority of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Derives priority from type and amount. Rules are evaluated in order,
    /// first match wins:
    ///
    /// 1. fraud categories → High
    /// 2. amount > 50 000 → High
    /// 3. amount > 10 000 → Medium
    /// 4. ATM or failed transaction → Medium
    /// 5. otherwise Low
    pub fn derive(dispute_type: DisputeType, amount: f64) -> Self {
        if dispute_type.is_fraud() {
            Priority::High
        } else if amount > HIGH_AMOUNT_THRESHOLD {
            Priority::High
        } else if amount > MEDIUM_AMOUNT_THRESHOLD {
            Priority::Medium
        } else if matches!(
            dispute_type,
            DisputeType::AtmDispute | DisputeType::FailedTransaction
        ) {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parses the lowercase wire form.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s.trim())
    }

    /// Title-cased label for chat replies.
    pub fn title(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Days until the expected resolution date.
    pub fn resolution_days(&self) -> i64 {
        match self {
            Priority::High => 5,
            Priority::Medium => 7,
            Priority::Low => 10,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable resolution estimate. ATM disputes settle faster than
/// their priority alone would suggest.
pub fn estimated_resolution(priority: Priority, dispute_type: DisputeType) -> &'static str {
    if dispute_type == DisputeType::AtmDispute {
        return "2-3 business days";
    }
    match priority {
        Priority::High => "3-5 business days",
        Priority::Medium => "5-7 business days",
        Priority::Low => "7-10 business days",
    }
}
