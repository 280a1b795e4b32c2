//! Static guidance catalog: step lists, complaint letters, document
//! checklists, reporting time limits and regulator guidelines.
//!
//! Types without a dedicated entry get the generic guidance, never another
//! type's material.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::DisputeType;

/// How soon a guidance step should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

/// One ordered recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceStep {
    pub step: u8,
    pub action: String,
    pub urgency: Urgency,
    pub timeline: String,
}

/// Everything the guidance endpoint returns for one dispute type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeGuidance {
    pub dispute_type: String,
    pub guidance_steps: Vec<GuidanceStep>,
    pub complaint_template: String,
    pub important_documents: Vec<String>,
    pub time_limits: BTreeMap<String, String>,
    pub rbi_guidelines: BTreeMap<String, String>,
}

impl DisputeGuidance {
    /// Assembles guidance for `dispute_type`, or the generic entry when the
    /// type is unknown.
    pub fn for_type(dispute_type: Option<DisputeType>) -> Self {
        let label = dispute_type
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| GENERIC_LABEL.to_string());
        Self {
            dispute_type: label,
            guidance_steps: guidance_steps(dispute_type),
            complaint_template: complaint_template(dispute_type).trim().to_string(),
            important_documents: important_documents(dispute_type),
            time_limits: time_limits(dispute_type),
            rbi_guidelines: rbi_guidelines(dispute_type),
        }
    }
}

const GENERIC_LABEL: &str = "General Dispute";

type StepRow = (&'static str, Urgency, &'static str);

const UNAUTHORIZED_STEPS: &[StepRow] = &[
    ("Block your card immediately", Urgency::Critical, "Immediately"),
    ("Call bank helpline", Urgency::Critical, "Within 2 hours"),
    ("File police complaint", Urgency::High, "Within 24 hours"),
    ("Submit written dispute to bank", Urgency::High, "Within 3 days"),
    ("Follow up regularly", Urgency::Medium, "Every 2-3 days"),
];

const DOUBLE_DEBIT_STEPS: &[StepRow] = &[
    ("Contact merchant first", Urgency::Medium, "Within 2 days"),
    ("Gather transaction proofs", Urgency::High, "Immediately"),
    ("Wait for merchant response", Urgency::Low, "7 days"),
    ("File bank dispute if no merchant response", Urgency::Medium, "After 7 days"),
    ("Submit all documentation", Urgency::High, "With dispute filing"),
];

const ATM_STEPS: &[StepRow] = &[
    ("Keep ATM receipt", Urgency::Critical, "Immediately"),
    ("Note ATM location and time", Urgency::High, "Immediately"),
    ("Contact bank immediately", Urgency::Critical, "Within 2 hours"),
    ("File written complaint", Urgency::High, "Within 24 hours"),
    ("Follow up for resolution", Urgency::Medium, "After 2-3 days"),
];

const MISSING_REFUND_STEPS: &[StepRow] = &[
    ("Check refund timeline with merchant", Urgency::Medium, "Immediately"),
    ("Contact merchant for refund status", Urgency::Medium, "After expected date"),
    ("Get refund confirmation from merchant", Urgency::High, "Within 3 days"),
    ("Contact bank if refund processed", Urgency::High, "After confirmation"),
    ("File dispute with bank", Urgency::Medium, "If no resolution in 15 days"),
];

const GENERIC_STEPS: &[StepRow] = &[
    ("Review your bank statement and note the transaction", Urgency::High, "Immediately"),
    ("Contact your bank helpline", Urgency::High, "Within 3 days"),
    ("Submit a written complaint with supporting documents", Urgency::Medium, "Within 30 days"),
    ("Follow up and keep the complaint reference", Urgency::Medium, "Every 3-5 days"),
    ("Escalate to the Banking Ombudsman if unresolved", Urgency::Low, "After 30 days"),
];

/// Ordered steps for a dispute type.
pub fn guidance_steps(dispute_type: Option<DisputeType>) -> Vec<GuidanceStep> {
    let rows = match dispute_type {
        Some(DisputeType::Unauthorized) => UNAUTHORIZED_STEPS,
        Some(DisputeType::DoubleDebit) => DOUBLE_DEBIT_STEPS,
        Some(DisputeType::AtmDispute) => ATM_STEPS,
        Some(DisputeType::MissingRefund) => MISSING_REFUND_STEPS,
        _ => GENERIC_STEPS,
    };
    rows.iter()
        .enumerate()
        .map(|(i, (action, urgency, timeline))| GuidanceStep {
            step: i as u8 + 1,
            action: action.to_string(),
            urgency: *urgency,
            timeline: timeline.to_string(),
        })
        .collect()
}

/// Complaint letter skeleton with `{placeholder}` fields.
pub fn complaint_template(dispute_type: Option<DisputeType>) -> &'static str {
    match dispute_type {
        Some(DisputeType::DoubleDebit) => DOUBLE_DEBIT_TEMPLATE,
        Some(DisputeType::Unauthorized) => UNAUTHORIZED_TEMPLATE,
        Some(DisputeType::AtmDispute) => ATM_TEMPLATE,
        Some(DisputeType::MissingRefund) => MISSING_REFUND_TEMPLATE,
        _ => GENERIC_TEMPLATE,
    }
}

/// Documents worth attaching to the complaint.
pub fn important_documents(dispute_type: Option<DisputeType>) -> Vec<String> {
    let docs: &[&str] = match dispute_type {
        Some(DisputeType::Unauthorized) => &[
            "Bank statement showing unauthorized transaction",
            "SMS alerts from bank",
            "Card blocking confirmation",
            "Police complaint copy (if filed)",
            "ID proof copy",
            "Recent transaction history",
        ],
        Some(DisputeType::DoubleDebit) => &[
            "Bank statement showing duplicate charges",
            "Original transaction receipt",
            "SMS alerts for both transactions",
            "Communication with merchant (emails/chat)",
            "Proof of single purchase/transaction",
        ],
        Some(DisputeType::AtmDispute) => &[
            "ATM transaction receipt",
            "Bank statement showing debit",
            "Photo of ATM (if possible)",
            "SMS alert of transaction",
            "Written complaint copy",
        ],
        Some(DisputeType::MissingRefund) => &[
            "Original transaction receipt",
            "Cancellation/refund request proof",
            "Merchant refund confirmation",
            "Bank statement showing original debit",
            "Communication with merchant",
        ],
        _ => &[
            "Bank statement showing the transaction",
            "Transaction receipt or reference number",
            "SMS or email alerts from bank",
            "Copy of written complaint",
        ],
    };
    docs.iter().map(|d| d.to_string()).collect()
}

fn table(rows: &[(&str, &str)]) -> BTreeMap<String, String> {
    rows.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Reporting deadlines. Type-specific rows override the base rows.
pub fn time_limits(dispute_type: Option<DisputeType>) -> BTreeMap<String, String> {
    let mut limits = table(&[
        ("report_to_bank", "Within 3 days for best results"),
        ("written_complaint", "Within 30 days of statement date"),
        ("rbi_ombudsman", "Within 30 days if bank doesn't respond"),
        ("chargeback_eligibility", "Within 120 days for card transactions"),
    ]);
    let overrides: &[(&str, &str)] = match dispute_type {
        Some(DisputeType::Unauthorized) => &[
            ("report_to_bank", "Within 3 days for zero liability"),
            ("card_blocking", "Immediately upon discovery"),
            ("police_complaint", "Within 24 hours for fraud cases"),
        ],
        Some(DisputeType::AtmDispute) => &[
            ("report_to_bank", "Within 30 minutes to 2 hours for best results"),
            ("written_complaint", "Within 30 days"),
        ],
        Some(DisputeType::DoubleDebit) => &[
            ("merchant_contact", "Within 2-3 days"),
            ("bank_dispute", "After 7 days if merchant unresponsive"),
        ],
        _ => &[],
    };
    limits.extend(table(overrides));
    limits
}

/// Regulator rules that apply to the dispute type.
pub fn rbi_guidelines(dispute_type: Option<DisputeType>) -> BTreeMap<String, String> {
    let mut guidelines = table(&[
        (
            "zero_liability",
            "Customers have zero liability for unauthorized electronic transactions if reported within 3 days",
        ),
        (
            "limited_liability",
            "Limited liability of ₹10,000 if reported within 4-7 days",
        ),
        ("resolution_timeline", "Banks must resolve disputes within 90 days"),
        (
            "ombudsman",
            "Approach Banking Ombudsman if bank doesn't respond within 30 days",
        ),
    ]);
    let extra: &[(&str, &str)] = match dispute_type {
        Some(DisputeType::Unauthorized) => &[
            ("immediate_action", "Bank must block card/account immediately upon reporting"),
            ("investigation", "Bank must complete investigation within 90 days"),
            (
                "provisional_credit",
                "Provisional credit within 10 days for amounts above ₹25,000",
            ),
        ],
        Some(DisputeType::AtmDispute) => &[
            ("auto_reversal", "Failed ATM transactions should be auto-reversed within 5 days"),
            ("compensation", "₹100 per day compensation after 5 days for ATM failures"),
        ],
        _ => &[],
    };
    guidelines.extend(table(extra));
    guidelines
}

const DOUBLE_DEBIT_TEMPLATE: &str = r#"
Subject: Dispute for Duplicate Transaction - Account Number: [Your Account Number]

Dear Sir/Madam,

I am writing to dispute a duplicate/double charge on my account for the following transaction:

Transaction Details:
- Date: {date}
- Amount: ₹{amount}
- Merchant: {merchant_name}
- Card ending: {card_last4}
- Reference Number: {reference_number}

The same transaction has been charged twice to my account. I have only made one purchase/transaction but have been charged multiple times.

I request immediate investigation and reversal of the duplicate charge along with any applicable fees.

Attached documents:
- Bank statement showing duplicate charges
- Original transaction receipt
- SMS alerts from bank

I look forward to a prompt resolution within the RBI mandated timeline.

Regards,
[Your Name]
[Contact Details]
"#;

const UNAUTHORIZED_TEMPLATE: &str = r#"
Subject: Unauthorized Transaction Dispute - Immediate Action Required

Dear Bank Manager,

I wish to report an unauthorized transaction on my account and request immediate action:

Transaction Details:
- Date: {date}
- Time: {time}
- Amount: ₹{amount}
- Location: {location}
- Card ending: {card_last4}
- Reference: {reference_number}

IMPORTANT: I did not authorize this transaction. My card was in my possession at the time.

Immediate Actions Requested:
1. Block my card immediately
2. Investigate this fraudulent transaction
3. Reverse the unauthorized charge
4. Issue new card with different number

I am filing this complaint within 3 days as per RBI guidelines and expect zero liability protection.

Urgently,
[Your Name]
[Contact Details]
"#;

const ATM_TEMPLATE: &str = r#"
Subject: ATM Transaction Dispute - Cash Not Dispensed

Dear Sir/Madam,

I wish to report an ATM transaction where cash was not dispensed but my account was debited.

ATM Transaction Details:
- Date: {date}
- Time: {time}
- ATM Location: {atm_location}
- Amount Requested: ₹{amount}
- Transaction ID: {transaction_id}
- ATM ID: {atm_id}

Issue: The amount was debited from my account but cash was not dispensed from the ATM.

I have retained the transaction receipt and request immediate credit of the amount back to my account.

Attached: ATM receipt and bank statement

Please resolve this within 2-3 business days as per standard ATM dispute resolution timeline.

Regards,
[Your Name]
[Account Number]
"#;

const MISSING_REFUND_TEMPLATE: &str = r#"
Subject: Missing Refund Claim - Transaction Cancelled

Dear Customer Service,

I am writing regarding a refund that has not been credited to my account for a cancelled transaction.

Original Transaction Details:
- Date: {transaction_date}
- Amount: ₹{amount}
- Merchant: {merchant_name}
- Cancellation Date: {cancellation_date}
- Refund Expected: {expected_refund_date}

The merchant has confirmed the cancellation and refund processing, but the amount has not been credited to my account within the expected timeline.

I request you to:
1. Track the refund status
2. Credit the amount if refund was processed by merchant
3. Provide timeline for resolution

Merchant refund confirmation and original transaction receipt are attached.

Thank you,
[Your Name]
[Contact Information]
"#;

const GENERIC_TEMPLATE: &str = r#"
Subject: Transaction Dispute - Account Number: [Your Account Number]

Dear Sir/Madam,

I wish to raise a dispute regarding the following transaction on my account:

Transaction Details:
- Date: {date}
- Amount: ₹{amount}
- Description: {description}
- Reference Number: {reference_number}

Please investigate this transaction and correct my account where appropriate.

Supporting documents are attached.

Regards,
[Your Name]
[Contact Details]
"#;
