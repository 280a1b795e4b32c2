//! Scripted reply texts and option menus.

use crate::domain::dispute::{estimated_resolution, Bank, DisputeRecord, DisputeType};
use crate::domain::foundation::DisputeId;

pub const MAIN_MENU_OPTIONS: [&str; 4] = [
    "Report a Dispute",
    "Track Existing Dispute",
    "Get Guidance",
    "Emergency Help",
];

pub const GUIDANCE_TOPICS: [&str; 4] = [
    "Unauthorized Transaction",
    "Duplicate Charge",
    "ATM Dispute",
    "Merchant Issues",
];

pub const RETRY_OPTIONS: [&str; 2] = ["Try Again", "Emergency Help"];

/// Phone number of the regulator's ombudsman line.
pub const OMBUDSMAN_HELPLINE: &str = "14448";

pub fn options(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Renders an amount with thousands separators and two decimals, e.g.
/// `₹5,000.00`.
pub fn format_rupees(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}₹{grouped}.{frac}")
}

pub fn welcome() -> String {
    "Hello! I'm your Banking Dispute Assistant. I can help you resolve banking disputes \
     quickly and effectively. How can I assist you today?"
        .to_string()
}

pub fn ask_dispute_type() -> String {
    "I'll help you report a dispute. What type of issue are you experiencing?".to_string()
}

pub fn reprompt_dispute_type() -> String {
    "Please select one of the dispute types from the options below:".to_string()
}

pub fn ask_bank(dispute_type: DisputeType) -> String {
    format!(
        "You've selected: **{}**\n\nWhich bank is involved in this dispute?",
        dispute_type
    )
}

pub fn reprompt_bank() -> String {
    "I couldn't match that to a bank. Please choose your bank from the options below:"
        .to_string()
}

pub fn ask_amount(bank: Bank) -> String {
    format!(
        "Bank: **{}**\nHelpline: {}\n\nWhat is the disputed amount? Please enter the amount in ₹ (e.g., 5000)",
        bank,
        bank.contact()
    )
}

pub fn reprompt_amount() -> String {
    "Please enter a valid amount in numbers (e.g., 5000 or 1500.50)".to_string()
}

pub fn ask_date(amount: f64) -> String {
    format!(
        "Amount: {}\n\nWhen did this transaction occur? Please provide the date (e.g., 2024-01-15 or 15 Jan 2024)",
        format_rupees(amount)
    )
}

pub fn reprompt_date() -> String {
    "Please provide a valid date (e.g., 2024-01-15, 15/01/2024, or 15 Jan 2024)".to_string()
}

pub fn ask_description(date: &str) -> String {
    format!("Date: {date}\n\nPlease provide a brief description of the dispute and what happened:")
}

pub fn reprompt_description() -> String {
    "Please describe what happened so we can include it in your dispute:".to_string()
}

pub fn ask_card() -> String {
    "Please provide the last 4 digits of the card involved (e.g., 1234). If not card-related, type 'N/A':"
        .to_string()
}

pub fn dispute_created(record: &DisputeRecord) -> String {
    format!(
        "✅ **Dispute Created Successfully!**\n\n\
         **Dispute ID**: {id}\n\
         **Priority**: {priority}\n\
         **Estimated Resolution**: {estimate}\n\n\
         **Next Steps:**\n\
         1. Block your card immediately if fraud-related\n\
         2. File police complaint for unauthorized transactions\n\
         3. Contact your bank: {contact}\n\
         4. Keep this dispute ID for tracking\n\n\
         You can track your dispute anytime by providing the Dispute ID.",
        id = record.id,
        priority = record.priority.title(),
        estimate = estimated_resolution(record.priority, record.dispute_type),
        contact = record.bank.contact(),
    )
}

pub fn form_incomplete() -> String {
    "Some details of your dispute were missing, so let's start again. What type of issue are you experiencing?"
        .to_string()
}

pub fn creation_failed() -> String {
    "I encountered an error creating your dispute. Please try again or contact your bank directly."
        .to_string()
}

pub fn technical_issue() -> String {
    "I apologize for the technical issue. Please try again or contact your bank directly for immediate assistance."
        .to_string()
}

pub fn ask_dispute_id() -> String {
    format!(
        "Please provide your dispute ID (starts with {}) or reference number:",
        DisputeId::PREFIX
    )
}

pub fn invalid_dispute_id() -> String {
    "Please provide a valid dispute ID (format: DSP12345678) or reference number.".to_string()
}

pub fn dispute_not_found() -> String {
    "Dispute ID not found. Please check the ID and try again, or contact your bank directly."
        .to_string()
}

pub fn dispute_status(record: &DisputeRecord) -> String {
    let timeline = record
        .timeline()
        .iter()
        .map(|entry| format!("✅ {} - {}", entry.status, entry.date.date_string()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "**Dispute Status**: {status}\n\n\
         **Details:**\n\
         • Type: {kind}\n\
         • Amount: {amount}\n\
         • Bank: {bank}\n\
         • Created: {created}\n\
         • Priority: {priority}\n\n\
         **Timeline:**\n\
         {timeline}\n\
         ⏳ Expected completion - {completion}\n\n\
         **Next action**: {next}",
        status = record.status,
        kind = record.dispute_type,
        amount = format_rupees(record.amount),
        bank = record.bank,
        created = record.created_at.date_string(),
        priority = record.priority.title(),
        timeline = timeline,
        completion = record.estimated_completion(),
        next = record.status.next_action(),
    )
}

pub fn general_guidance() -> String {
    "Here are some helpful resources for banking disputes:\n\n\
     • **Time is critical**: Contact your bank within 24 hours for unauthorized transactions\n\
     • **Gather evidence**: Save SMS alerts, receipts, and screenshots\n\
     • **File written complaint**: Submit formal dispute letter to your bank\n\
     • **Keep records**: Document all communications and reference numbers\n\
     • **Follow up**: Check status regularly and escalate if needed\n\n\
     Would you like detailed guidance for a specific type of dispute?"
        .to_string()
}

pub fn emergency_help() -> String {
    let helplines = Bank::ALL
        .iter()
        .filter_map(|bank| bank.helpline().map(|number| format!("**{bank}**: {number}")))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🚨 **Emergency Actions for Banking Fraud:**\n\n\
         **Immediate Steps:**\n\
         • Block your card/account immediately\n\
         • Report fraud to bank within 2 hours for zero liability\n\
         • File police complaint for criminal activities\n\
         • Change all online banking passwords\n\n\
         **24/7 Bank Helplines:**\n\
         {helplines}\n\n\
         **RBI Banking Ombudsman**: {OMBUDSMAN_HELPLINE} (Toll-free)\n\n\
         Which bank do you need help with?"
    )
}
