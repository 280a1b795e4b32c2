//! Dispute categories offered in the chat menu.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed enumeration of dispute categories.
///
/// Serialized with the same label shown to the user in the option menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisputeType {
    #[serde(rename = "Double Debit / Duplicate Charge")]
    DoubleDebit,
    #[serde(rename = "Unauthorized Transaction")]
    Unauthorized,
    #[serde(rename = "Missing Refund")]
    MissingRefund,
    #[serde(rename = "Wrong Balance/Amount")]
    WrongAmount,
    #[serde(rename = "Failed Transaction")]
    FailedTransaction,
    #[serde(rename = "ATM Dispute")]
    AtmDispute,
    #[serde(rename = "Merchant Fraud")]
    MerchantFraud,
    #[serde(rename = "Card Skimming")]
    CardSkimming,
    #[serde(rename = "Other")]
    Other,
}

impl DisputeType {
    /// All categories, in menu order.
    pub const ALL: [DisputeType; 9] = [
        DisputeType::DoubleDebit,
        DisputeType::Unauthorized,
        DisputeType::MissingRefund,
        DisputeType::WrongAmount,
        DisputeType::FailedTransaction,
        DisputeType::AtmDispute,
        DisputeType::MerchantFraud,
        DisputeType::CardSkimming,
        DisputeType::Other,
    ];

    /// Label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            DisputeType::DoubleDebit => "Double Debit / Duplicate Charge",
            DisputeType::Unauthorized => "Unauthorized Transaction",
            DisputeType::MissingRefund => "Missing Refund",
            DisputeType::WrongAmount => "Wrong Balance/Amount",
            DisputeType::FailedTransaction => "Failed Transaction",
            DisputeType::AtmDispute => "ATM Dispute",
            DisputeType::MerchantFraud => "Merchant Fraud",
            DisputeType::CardSkimming => "Card Skimming",
            DisputeType::Other => "Other",
        }
    }

    /// Exact (case-insensitive) label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        let needle = label.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(needle))
    }

    /// Fraud categories are always treated as high priority.
    pub fn is_fraud(&self) -> bool {
        matches!(
            self,
            DisputeType::Unauthorized | DisputeType::MerchantFraud | DisputeType::CardSkimming
        )
    }

    /// Menu labels for the option list.
    pub fn menu_options() -> Vec<String> {
        Self::ALL.iter().map(|t| t.label().to_string()).collect()
    }
}

impl fmt::Display for DisputeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_menu_label() {
        let json = serde_json::to_string(&DisputeType::AtmDispute).unwrap();
        assert_eq!(json, "\"ATM Dispute\"");
        let back: DisputeType = serde_json::from_str("\"Wrong Balance/Amount\"").unwrap();
        assert_eq!(back, DisputeType::WrongAmount);
    }

    #[test]
    fn from_label_ignores_case() {
        assert_eq!(
            DisputeType::from_label("unauthorized transaction"),
            Some(DisputeType::Unauthorized)
        );
        assert_eq!(DisputeType::from_label("lottery win"), None);
    }

    #[test]
    fn fraud_categories() {
        let fraud: Vec<_> = DisputeType::ALL.iter().filter(|t| t.is_fraud()).collect();
        assert_eq!(fraud.len(), 3);
        assert!(!DisputeType::AtmDispute.is_fraud());
    }

    #[test]
    fn menu_has_every_category() {
        assert_eq!(DisputeType::menu_options().len(), DisputeType::ALL.len());
    }
}
