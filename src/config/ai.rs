//! AI fallback configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which backend answers free-text messages the dialogue cannot place.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderKind {
    /// Scripted replies only
    #[default]
    None,
    OpenAI,
    Ollama,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub provider: AiProviderKind,

    pub openai_api_key: Option<SecretString>,

    /// Model override; each provider has its own default
    pub model: Option<String>,

    pub openai_base_url: Option<String>,

    pub ollama_base_url: Option<String>,

    /// Upper bound on one completion round trip, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_openai_key(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.provider == AiProviderKind::OpenAI && !self.has_openai_key() {
            return Err(ValidationError::MissingRequired("AI__OPENAI_API_KEY"));
        }
        for url in [&self.openai_base_url, &self.ollama_base_url]
            .into_iter()
            .flatten()
        {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidAiBaseUrl(url.clone()));
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProviderKind::None,
            openai_api_key: None,
            model: None,
            openai_base_url: None,
            ollama_base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
