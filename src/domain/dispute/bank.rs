//! Supported banks and their public contact points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback text when a bank has no published helpline.
pub const CONTACT_BANK_DIRECTLY: &str = "Contact your bank directly";

/// Banks offered in the chat menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bank {
    #[serde(rename = "State Bank of India")]
    StateBankOfIndia,
    #[serde(rename = "HDFC Bank")]
    Hdfc,
    #[serde(rename = "ICICI Bank")]
    Icici,
    #[serde(rename = "Axis Bank")]
    Axis,
    #[serde(rename = "Punjab National Bank")]
    PunjabNational,
    #[serde(rename = "Bank of Baroda")]
    BankOfBaroda,
    #[serde(rename = "Canara Bank")]
    Canara,
    #[serde(rename = "Other")]
    Other,
}

impl Bank {
    /// All banks, in menu order.
    pub const ALL: [Bank; 8] = [
        Bank::StateBankOfIndia,
        Bank::Hdfc,
        Bank::Icici,
        Bank::Axis,
        Bank::PunjabNational,
        Bank::BankOfBaroda,
        Bank::Canara,
        Bank::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Bank::StateBankOfIndia => "State Bank of India",
            Bank::Hdfc => "HDFC Bank",
            Bank::Icici => "ICICI Bank",
            Bank::Axis => "Axis Bank",
            Bank::PunjabNational => "Punjab National Bank",
            Bank::BankOfBaroda => "Bank of Baroda",
            Bank::Canara => "Canara Bank",
            Bank::Other => "Other",
        }
    }

    /// 24/7 toll-free helpline, if the bank publishes one.
    pub fn helpline(&self) -> Option<&'static str> {
        match self {
            Bank::StateBankOfIndia => Some("1800 1111 109"),
            Bank::Hdfc => Some("1800 2611 232"),
            Bank::Icici => Some("1800 2000 888"),
            Bank::Axis => Some("1800 4196 4444"),
            Bank::PunjabNational => Some("1800 2222 244"),
            Bank::BankOfBaroda => Some("1800 2580 244"),
            Bank::Canara => Some("1800 4250 0018"),
            Bank::Other => None,
        }
    }

    /// Helpline or a generic instruction.
    pub fn contact(&self) -> &'static str {
        self.helpline().unwrap_or(CONTACT_BANK_DIRECTLY)
    }

    /// Case-insensitive name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim();
        Self::ALL.into_iter().find(|b| b.name().eq_ignore_ascii_case(needle))
    }

    fn slug(&self) -> String {
        self.name().to_lowercase().replace(' ', "")
    }

    /// Public contact details.
    pub fn info(&self) -> BankInfo {
        let listed = !matches!(self, Bank::Other);
        BankInfo {
            name: self.name().to_string(),
            helpline: self.contact().to_string(),
            dispute_email: listed.then(|| format!("disputes@{}.com", self.slug())),
            online_portal: listed.then(|| format!("https://{}.com/disputes", self.slug())),
        }
    }

    pub fn menu_options() -> Vec<String> {
        Self::ALL.iter().map(|b| b.name().to_string()).collect()
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contact details returned by the bank directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankInfo {
    pub name: String,
    pub helpline: String,
    pub dispute_email: Option<String>,
    pub online_portal: Option<String>,
}
