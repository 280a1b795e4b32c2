//! DisputeStatus enum for tracking the lifecycle of a dispute record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a dispute. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    #[default]
    Submitted,
    UnderReview,
    Resolved,
    Escalated,
}

impl DisputeStatus {
    pub const ALL: [DisputeStatus; 4] = [
        DisputeStatus::Submitted,
        DisputeStatus::UnderReview,
        DisputeStatus::Resolved,
        DisputeStatus::Escalated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisputeStatus::Submitted => "submitted",
            DisputeStatus::UnderReview => "under_review",
            DisputeStatus::Resolved => "resolved",
            DisputeStatus::Escalated => "escalated",
        }
    }

    /// Parses the wire form (`under_review`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s.trim())
    }

    /// Rough completion percentage shown to customers.
    pub fn progress_percentage(&self) -> u8 {
        match self {
            DisputeStatus::Submitted => 25,
            DisputeStatus::UnderReview => 60,
            DisputeStatus::Escalated => 80,
            DisputeStatus::Resolved => 100,
        }
    }

    /// Recommended next action for the customer.
    pub fn next_action(&self) -> &'static str {
        match self {
            DisputeStatus::Submitted => "Wait for bank acknowledgment (expected within 2 hours)",
            DisputeStatus::UnderReview => {
                "Bank is investigating. You can follow up after 3-5 days"
            }
            DisputeStatus::Escalated => "Contact Banking Ombudsman if no response in 30 days",
            DisputeStatus::Resolved => "No further action required",
        }
    }
}

impl StateMachine for DisputeStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DisputeStatus::*;
        matches!(
            (self, target),
            (Submitted, UnderReview)
                | (Submitted, Escalated)
                | (UnderReview, Resolved)
                | (UnderReview, Escalated)
                | (Escalated, Resolved)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DisputeStatus::*;
        match self {
            Submitted => vec![UnderReview, Escalated],
            UnderReview => vec![Resolved, Escalated],
            Escalated => vec![Resolved],
            Resolved => vec![],
        }
    }
}

impl fmt::Display for DisputeStatus {
    /// Title case with spaces, e.g. "Under Review".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DisputeStatus::Submitted => "Submitted",
            DisputeStatus::UnderReview => "Under Review",
            DisputeStatus::Resolved => "Resolved",
            DisputeStatus::Escalated => "Escalated",
        };
        f.write_str(s)
    }
}
