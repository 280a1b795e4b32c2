//! Static reference queries: guidance catalog and bank directory.

use crate::domain::chat::extractors;
use crate::domain::dispute::{Bank, BankInfo, DisputeGuidance, DisputeType};

/// Guidance for a dispute type given as free text.
///
/// Exact labels are preferred, then a loose match; anything else gets the
/// generic entry.
pub fn dispute_guidance(dispute_type: &str) -> DisputeGuidance {
    let resolved = DisputeType::from_label(dispute_type)
        .or_else(|| extractors::parse_dispute_type(dispute_type).ok());
    DisputeGuidance::for_type(resolved)
}

/// Contact details for every supported bank, in menu order.
pub fn bank_directory() -> Vec<BankInfo> {
    Bank::ALL.iter().map(Bank::info).collect()
}
