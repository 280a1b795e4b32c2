//! Per-conversation state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ChatStep;
use crate::domain::dispute::{Bank, DisputeForm, DisputeType};
use crate::domain::foundation::{SessionId, Timestamp, ValidationError};

/// Free-form key/value bag carried alongside a session.
pub type ChatContext = Map<String, Value>;

/// Partially filled dispute form. Fields are populated strictly in step order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub dispute_type: Option<DisputeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<Bank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
}

impl FormDraft {
    pub fn is_empty(&self) -> bool {
        *self == FormDraft::default()
    }

    /// Converts a complete draft into a validated form.
    pub fn to_form(&self) -> Result<DisputeForm, ValidationError> {
        DisputeForm::new(
            self.dispute_type
                .ok_or_else(|| ValidationError::empty_field("type"))?,
            self.bank.ok_or_else(|| ValidationError::empty_field("bank"))?,
            self.amount
                .ok_or_else(|| ValidationError::empty_field("amount"))?,
            self.date
                .clone()
                .ok_or_else(|| ValidationError::empty_field("date"))?,
            self.description
                .clone()
                .ok_or_else(|| ValidationError::empty_field("description"))?,
            self.card_last_four
                .clone()
                .ok_or_else(|| ValidationError::empty_field("card_last_four"))?,
        )
    }
}

/// One active conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: SessionId,
    pub step: ChatStep,
    pub dispute_form: FormDraft,
    #[serde(default)]
    pub context: ChatContext,
    pub updated_at: Timestamp,
}

impl ChatSession {
    /// A fresh session at `greeting` with an empty form and context.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            step: ChatStep::Greeting,
            dispute_form: FormDraft::default(),
            context: ChatContext::new(),
            updated_at: Timestamp::now(),
        }
    }

    /// Moves to `step`, refreshing the write timestamp.
    pub fn advance_to(&mut self, step: ChatStep) {
        self.step = step;
        self.updated_at = Timestamp::now();
    }

    /// Starts the dispute form over.
    pub fn restart_form(&mut self) {
        self.dispute_form = FormDraft::default();
        self.advance_to(ChatStep::DisputeType);
    }

    /// Stored context overlaid with caller-supplied keys. Caller keys win.
    pub fn merged_context(&self, overlay: &ChatContext) -> ChatContext {
        let mut merged = self.context.clone();
        for (key, value) in overlay {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_draft() -> FormDraft {
        FormDraft {
            dispute_type: Some(DisputeType::DoubleDebit),
            bank: Some(Bank::Hdfc),
            amount: Some(5000.0),
            date: Some("2024-01-15".into()),
            description: Some("charged twice".into()),
            card_last_four: Some("1234".into()),
        }
    }

    #[test]
    fn new_session_starts_at_greeting() {
        let session = ChatSession::new(SessionId::generate());
        assert_eq!(session.step, ChatStep::Greeting);
        assert!(session.dispute_form.is_empty());
        assert!(session.context.is_empty());
    }

    #[test]
    fn complete_draft_converts_to_form() {
        let form = complete_draft().to_form().unwrap();
        assert_eq!(form.amount, 5000.0);
        assert_eq!(form.bank, Bank::Hdfc);
    }

    #[test]
    fn incomplete_draft_names_missing_field() {
        let mut draft = complete_draft();
        draft.date = None;
        let err = draft.to_form().unwrap_err();
        assert_eq!(err.field(), "date");
    }

    #[test]
    fn restart_form_clears_fields() {
        let mut session = ChatSession::new(SessionId::generate());
        session.dispute_form = complete_draft();
        session.step = ChatStep::AmountInput;
        session.restart_form();
        assert_eq!(session.step, ChatStep::DisputeType);
        assert!(session.dispute_form.is_empty());
    }

    #[test]
    fn overlay_keys_win_when_merging_context() {
        let mut session = ChatSession::new(SessionId::generate());
        session.context.insert("channel".into(), json!("web"));
        session.context.insert("lang".into(), json!("en"));
        let mut overlay = ChatContext::new();
        overlay.insert("lang".into(), json!("hi"));

        let merged = session.merged_context(&overlay);
        assert_eq!(merged["channel"], "web");
        assert_eq!(merged["lang"], "hi");
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut session = ChatSession::new(SessionId::new("abc").unwrap());
        session.dispute_form.dispute_type = Some(DisputeType::AtmDispute);
        session.step = ChatStep::BankSelection;
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"step\":\"bank_selection\""));
        assert!(json.contains("\"type\":\"ATM Dispute\""));
        let back: ChatSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
