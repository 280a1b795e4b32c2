//! Field extractors: pure functions turning free text into typed form values.
//!
//! None of these read session state. Each returns the typed value or a
//! `ValidationError` that the dialogue turns into a re-prompt.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::dispute::{Bank, DisputeType, NO_CARD};
use crate::domain::foundation::ValidationError;

/// First run of digits, allowing thousands separators and a decimal part.
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap());

/// Minimum length of an acceptable date answer.
pub const MIN_DATE_LEN: usize = 8;

/// True when either string contains the other, ignoring case.
fn loosely_matches(candidate: &str, message: &str) -> bool {
    let candidate = candidate.to_lowercase();
    candidate.contains(message) || message.contains(&candidate)
}

fn normalized(message: &str) -> String {
    message.trim().to_lowercase()
}

/// Matches a dispute type by bidirectional, case-insensitive substring.
pub fn parse_dispute_type(message: &str) -> Result<DisputeType, ValidationError> {
    let needle = normalized(message);
    if needle.is_empty() {
        return Err(ValidationError::empty_field("type"));
    }
    DisputeType::ALL
        .into_iter()
        .find(|t| loosely_matches(t.label(), &needle))
        .ok_or_else(|| ValidationError::not_recognized("type", message.trim()))
}

/// Matches a bank the same way. The first bank in menu order wins when
/// several match.
pub fn parse_bank(message: &str) -> Result<Bank, ValidationError> {
    let needle = normalized(message);
    if needle.is_empty() {
        return Err(ValidationError::empty_field("bank"));
    }
    Bank::ALL
        .into_iter()
        .find(|b| loosely_matches(b.name(), &needle))
        .ok_or_else(|| ValidationError::not_recognized("bank", message.trim()))
}

/// Parses the first number in the message. Commas are stripped; the value
/// must be positive.
///
/// A message with several numbers yields the first one.
pub fn parse_amount(message: &str) -> Result<f64, ValidationError> {
    let token = AMOUNT_PATTERN
        .find(message)
        .ok_or_else(|| ValidationError::not_recognized("amount", message.trim()))?;

    let amount: f64 = token
        .as_str()
        .replace(',', "")
        .parse()
        .map_err(|_| ValidationError::invalid_format("amount", "not a number"))?;

    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::invalid_format(
            "amount",
            "must be greater than zero",
        ))
    }
}

/// Loose date check: at least one digit and a minimum length.
///
/// Returns the trimmed text unparsed.
pub fn parse_date(message: &str) -> Result<String, ValidationError> {
    let date = message.trim();
    let has_digit = date.chars().any(|c| c.is_ascii_digit());
    if has_digit && date.chars().count() >= MIN_DATE_LEN {
        Ok(date.to_string())
    } else {
        Err(ValidationError::invalid_format(
            "date",
            "expected something like 2024-01-15",
        ))
    }
}

/// Any non-blank text.
pub fn parse_description(message: &str) -> Result<String, ValidationError> {
    let description = message.trim();
    if description.is_empty() {
        Err(ValidationError::empty_field("description"))
    } else {
        Ok(description.to_string())
    }
}

/// `n/a` in any case becomes the `N/A` sentinel. Anything else keeps its
/// last four characters, ignoring spaces and hyphens, so a pasted card
/// number yields its trailing digits.
pub fn parse_card_last_four(message: &str) -> Result<String, ValidationError> {
    let card = message.trim();
    if card.is_empty() {
        return Err(ValidationError::empty_field("card_last_four"));
    }
    if card.eq_ignore_ascii_case(NO_CARD) {
        return Ok(NO_CARD.to_string());
    }
    let compact: Vec<char> = card
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if compact.is_empty() {
        return Err(ValidationError::empty_field("card_last_four"));
    }
    let start = compact.len().saturating_sub(4);
    Ok(compact[start..].iter().collect())
}
