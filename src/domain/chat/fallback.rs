//! Keyword-based static replies and the AI system prompt.
//!
//! Static replies are what the user sees whenever the AI backend is
//! missing, slow or failing.

use super::ChatContext;

const RULES: &[(&[&str], &str)] = &[
    (
        &["unauthorized", "fraud", "stolen", "hacked"],
        "🚨 This seems urgent! For unauthorized transactions: 1) Block your card IMMEDIATELY \
         2) Call your bank's helpline 3) Report within 24 hours for zero liability protection",
    ),
    (
        &["duplicate", "double", "charged twice", "same transaction"],
        "For duplicate charges: 1) Contact the merchant first for a refund 2) If no response in \
         7 days, file a dispute with your bank 3) Keep transaction receipts as proof",
    ),
    (
        &["atm", "cash", "withdrawal", "dispense"],
        "For ATM disputes: 1) Keep the transaction receipt 2) Note the ATM location and time \
         3) Contact your bank immediately with these details 4) Most ATM issues resolve in 2-3 \
         business days",
    ),
    (
        &["refund", "return", "money back", "cancelled"],
        "For missing refunds: 1) Check if the refund timeline has passed 2) Contact the merchant \
         first 3) If merchant doesn't respond, file a dispute with your bank within 30 days",
    ),
    (
        &["wrong amount", "balance", "statement", "error"],
        "For balance/amount disputes: 1) Check your bank statement carefully 2) Note the \
         incorrect transaction details 3) Contact your bank within 3 days 4) File a written \
         complaint for best results",
    ),
    (
        &["hello", "hi", "help", "start", "support"],
        "Hello! I'm here to help with banking disputes. I can assist you with: • Reporting \
         unauthorized transactions • Filing duplicate charge disputes • ATM issues • Tracking \
         existing disputes",
    ),
];

const DEFAULT_REPLY: &str = "I understand you're facing a banking issue. For immediate help: \
     • Call your bank's helpline for urgent issues • Use 'Report a Dispute' to file a new \
     complaint • Select 'Emergency Help' for fraud situations • Choose 'Get Guidance' for \
     general advice";

/// Picks the first keyword group that appears in the message.
pub fn static_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}

/// System prompt for the AI backend, with the session context embedded as JSON.
pub fn system_prompt(context: &ChatContext) -> String {
    let context_json =
        serde_json::to_string(context).unwrap_or_else(|_| "{}".to_string());
    format!(
        "You are a helpful banking dispute resolution assistant for Indian banks. \
         You help customers report unauthorized transactions, duplicate charges, ATM \
         problems and missing refunds, and you explain RBI guidelines for dispute \
         resolution. Keep answers short, practical and action-oriented. Always recommend \
         contacting the bank helpline for urgent fraud.\n\n\
         Current context: {context_json}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fraud_keywords_take_precedence() {
        assert!(static_reply("my card was STOLEN and there is a double charge").starts_with("🚨"));
    }

    #[test]
    fn atm_keyword_matches() {
        assert!(static_reply("the atm ate my money").starts_with("For ATM disputes"));
    }

    #[test]
    fn unknown_text_gets_default_reply() {
        assert_eq!(static_reply("qwerty"), DEFAULT_REPLY);
    }

    #[test]
    fn same_message_same_reply() {
        assert_eq!(static_reply("refund please"), static_reply("refund please"));
    }

    #[test]
    fn prompt_embeds_context() {
        let mut context = ChatContext::new();
        context.insert("step".into(), json!("greeting"));
        let prompt = system_prompt(&context);
        assert!(prompt.contains("\"step\":\"greeting\""));
    }
}
