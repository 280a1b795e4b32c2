//! Dispute domain: categories, banks, priority, status lifecycle, records
//! and the guidance catalog.

mod bank;
mod dispute_type;
pub mod guidance;
mod priority;
mod record;
mod status;

pub use bank::{Bank, BankInfo, CONTACT_BANK_DIRECTLY};
pub use dispute_type::DisputeType;
pub use guidance::{DisputeGuidance, GuidanceStep, Urgency};
pub use priority::{estimated_resolution, Priority};
pub use record::{DisputeForm, DisputeRecord, TimelineEntry, NO_CARD};
pub use status::DisputeStatus;
