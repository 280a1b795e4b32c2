//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Opaque identifier for a chat session.
///
/// Callers may supply their own value (for example a websocket path segment);
/// when absent a random UUID is generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Uses the supplied id when present and non-blank, otherwise generates one.
    pub fn from_optional(id: Option<&str>) -> Self {
        id.and_then(|s| Self::new(s).ok())
            .unwrap_or_else(Self::generate)
    }

    /// Returns the string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted dispute: `DSP` followed by 8 uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisputeId(String);

impl DisputeId {
    /// Fixed human-readable prefix.
    pub const PREFIX: &'static str = "DSP";

    /// Total length of a well-formed id.
    pub const LENGTH: usize = 11;

    /// Generates a fresh id from a random UUID.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", Self::PREFIX, hex[..8].to_uppercase()))
    }

    /// Parses user-supplied text, tolerating surrounding whitespace and lowercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let candidate = input.trim().to_uppercase();
        if !candidate.starts_with(Self::PREFIX) || candidate.len() != Self::LENGTH {
            return Err(ValidationError::invalid_format(
                "dispute_id",
                format!("expected {}XXXXXXXX", Self::PREFIX),
            ));
        }
        if !candidate[Self::PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_hexdigit())
        {
            return Err(ValidationError::invalid_format(
                "dispute_id",
                "suffix must be hexadecimal",
            ));
        }
        Ok(Self(candidate))
    }

    /// Returns the string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisputeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisputeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DisputeId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DisputeId> for String {
    fn from(id: DisputeId) -> Self {
        id.0
    }
}
