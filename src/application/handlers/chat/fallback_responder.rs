//! FallbackResponder - Open-ended replies outside the structured flow.
//!
//! Tries the configured AI provider under a hard timeout. Any failure,
//! timeout or empty answer degrades to a keyword-based static reply; this
//! responder never returns an error.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::chat::{fallback, ChatContext};
use crate::domain::foundation::SessionId;
use crate::ports::{AIProvider, CompletionRequest, MessageRole, ProviderInfo, RequestMetadata};

const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

/// Default upper bound on one AI round trip.
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(30);

/// Produces a reply for free text that no dialogue step handles.
pub struct FallbackResponder {
    provider: Option<Arc<dyn AIProvider>>,
    timeout: Duration,
}

impl FallbackResponder {
    pub fn new(provider: Arc<dyn AIProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
        }
    }

    /// Static keyword replies only.
    pub fn static_only() -> Self {
        Self {
            provider: None,
            timeout: DEFAULT_AI_TIMEOUT,
        }
    }

    /// Provider details, or `None` when running on static replies.
    pub fn provider_info(&self) -> Option<ProviderInfo> {
        self.provider.as_ref().map(|p| p.provider_info())
    }

    pub async fn respond(
        &self,
        session_id: &SessionId,
        message: &str,
        context: &ChatContext,
    ) -> String {
        let Some(provider) = &self.provider else {
            return fallback::static_reply(message).to_string();
        };

        let request = CompletionRequest::new(RequestMetadata::new(
            session_id.clone(),
            uuid::Uuid::new_v4().to_string(),
        ))
        .with_system_prompt(fallback::system_prompt(context))
        .with_message(MessageRole::User, message)
        .with_max_tokens(MAX_TOKENS)
        .with_temperature(TEMPERATURE)
        .with_top_p(TOP_P);

        match tokio::time::timeout(self.timeout, provider.complete(request)).await {
            Ok(Ok(response)) if !response.content.trim().is_empty() => {
                response.content.trim().to_string()
            }
            Ok(Ok(_)) => {
                tracing::warn!(session_id = %session_id, "AI provider returned an empty reply");
                fallback::static_reply(message).to_string()
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    retryable = e.is_retryable(),
                    "AI provider failed, using static reply"
                );
                fallback::static_reply(message).to_string()
            }
            Err(_) => {
                tracing::warn!(
                    session_id = %session_id,
                    timeout_secs = self.timeout.as_secs(),
                    "AI provider timed out, using static reply"
                );
                fallback::static_reply(message).to_string()
            }
        }
    }
}
