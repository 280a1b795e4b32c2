//! Dialogue steps.
//!
//! The intake flow is linear:
//! `greeting → main_menu → dispute_type → bank_selection → amount_input →
//! date_input → description_input → card_info`. `track_dispute` is a side
//! branch reachable from any step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current position of a session in the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatStep {
    /// Fresh session, nothing said yet.
    #[default]
    Greeting,
    MainMenu,
    DisputeType,
    BankSelection,
    AmountInput,
    DateInput,
    DescriptionInput,
    /// Last field; completing it creates the dispute.
    CardInfo,
    /// Awaiting a dispute ID to look up.
    TrackDispute,
}

impl ChatStep {
    pub const ALL: [ChatStep; 9] = [
        ChatStep::Greeting,
        ChatStep::MainMenu,
        ChatStep::DisputeType,
        ChatStep::BankSelection,
        ChatStep::AmountInput,
        ChatStep::DateInput,
        ChatStep::DescriptionInput,
        ChatStep::CardInfo,
        ChatStep::TrackDispute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatStep::Greeting => "greeting",
            ChatStep::MainMenu => "main_menu",
            ChatStep::DisputeType => "dispute_type",
            ChatStep::BankSelection => "bank_selection",
            ChatStep::AmountInput => "amount_input",
            ChatStep::DateInput => "date_input",
            ChatStep::DescriptionInput => "description_input",
            ChatStep::CardInfo => "card_info",
            ChatStep::TrackDispute => "track_dispute",
        }
    }

    /// The step that follows a successfully captured field.
    ///
    /// `None` for `card_info` (terminal) and for steps outside the form.
    pub fn next_form_step(&self) -> Option<ChatStep> {
        match self {
            ChatStep::DisputeType => Some(ChatStep::BankSelection),
            ChatStep::BankSelection => Some(ChatStep::AmountInput),
            ChatStep::AmountInput => Some(ChatStep::DateInput),
            ChatStep::DateInput => Some(ChatStep::DescriptionInput),
            ChatStep::DescriptionInput => Some(ChatStep::CardInfo),
            _ => None,
        }
    }

    /// True while the user is filling in the dispute form.
    pub fn is_collecting_form(&self) -> bool {
        matches!(
            self,
            ChatStep::DisputeType
                | ChatStep::BankSelection
                | ChatStep::AmountInput
                | ChatStep::DateInput
                | ChatStep::DescriptionInput
                | ChatStep::CardInfo
        )
    }
}

impl fmt::Display for ChatStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
