//! ChatHandler - The dialogue state machine.
//!
//! One inbound message is one pass: load or create the session, check the
//! side-branch triggers, then dispatch on the current step. A step either
//! captures its field and advances, or re-prompts and leaves the session
//! untouched. The final step hands the form to `CreateDisputeHandler` and
//! deletes the session only when the record was stored.
//!
//! The handler holds no per-session lock. Callers must not run two messages
//! for the same session concurrently.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::chat::replies::{
    self, options, GUIDANCE_TOPICS, MAIN_MENU_OPTIONS, RETRY_OPTIONS,
};
use crate::domain::chat::{extractors, ChatContext, ChatSession, ChatStep};
use crate::domain::dispute::{Bank, DisputeType};
use crate::domain::foundation::{DisputeId, SessionId};
use crate::ports::{DisputeRepository, SessionStore};

use super::{ChatError, FallbackResponder};
use crate::application::handlers::dispute::{CreateDisputeCommand, CreateDisputeHandler};

/// `action` value sent when a dispute was created and the dialogue ended.
pub const ACTION_DISPUTE_CREATED: &str = "dispute_created";

const GREETING_WORDS: [&str; 4] = ["hello", "hi", "help", "start"];

/// Inbound chat message.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
    pub context: ChatContext,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Outbound chat reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    pub response: String,
    /// Exhaustive menu of valid next replies, when present.
    pub options: Option<Vec<String>>,
    pub action: Option<String>,
    pub dispute_id: Option<String>,
    pub context: Option<ChatContext>,
}

impl ChatReply {
    fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Default::default()
        }
    }

    fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    fn for_session(mut self, session_id: &SessionId, step: Option<ChatStep>) -> Self {
        let mut context = ChatContext::new();
        context.insert("session_id".into(), Value::from(session_id.as_str()));
        if let Some(step) = step {
            context.insert("step".into(), Value::from(step.as_str()));
        }
        self.context = Some(context);
        self
    }

    fn at(self, session: &ChatSession) -> Self {
        self.for_session(&session.session_id, Some(session.step))
    }
}

/// Phrases that override the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SideBranch {
    Track,
    Guidance,
    Emergency,
    RestartReport,
}

impl SideBranch {
    fn detect(lower: &str, step: ChatStep) -> Option<Self> {
        if lower.contains("track existing dispute") {
            Some(SideBranch::Track)
        } else if lower.contains("get guidance") {
            Some(SideBranch::Guidance)
        } else if lower.contains("emergency help") {
            Some(SideBranch::Emergency)
        } else if step != ChatStep::Greeting && lower.contains("report a dispute") {
            Some(SideBranch::RestartReport)
        } else {
            None
        }
    }
}

fn is_greeting(lower: &str) -> bool {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| GREETING_WORDS.contains(&word))
}

/// Handler for inbound chat messages.
pub struct ChatHandler {
    sessions: Arc<dyn SessionStore>,
    disputes: Arc<dyn DisputeRepository>,
    create_dispute: CreateDisputeHandler,
    responder: Arc<FallbackResponder>,
}

impl ChatHandler {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        disputes: Arc<dyn DisputeRepository>,
        responder: Arc<FallbackResponder>,
    ) -> Self {
        Self {
            create_dispute: CreateDisputeHandler::new(disputes.clone()),
            sessions,
            disputes,
            responder,
        }
    }

    pub fn responder(&self) -> &FallbackResponder {
        &self.responder
    }

    /// Processes one message. Never fails: every error becomes a scripted
    /// apology with safe next actions.
    pub async fn handle(&self, request: ChatRequest) -> ChatReply {
        let session_id = SessionId::from_optional(request.session_id.as_deref());

        match self.process(&session_id, request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Chat processing failed");
                ChatReply::text(replies::technical_issue())
                    .with_options(options(&RETRY_OPTIONS))
                    .for_session(&session_id, None)
            }
        }
    }

    async fn process(
        &self,
        session_id: &SessionId,
        request: ChatRequest,
    ) -> Result<ChatReply, ChatError> {
        let mut session = match self.sessions.get(session_id).await? {
            Some(session) => session,
            None => {
                tracing::debug!(session_id = %session_id, "Starting chat session");
                self.sessions.create(session_id).await?
            }
        };
        session.context = session.merged_context(&request.context);

        let message = request.message.trim();
        let lower = message.to_lowercase();

        if let Some(branch) = SideBranch::detect(&lower, session.step) {
            return self.side_branch(branch, session).await;
        }

        match session.step {
            ChatStep::Greeting | ChatStep::MainMenu => self.greet(session, message, &lower).await,
            ChatStep::DisputeType => self.select_dispute_type(session, message).await,
            ChatStep::BankSelection => self.select_bank(session, message).await,
            ChatStep::AmountInput => self.capture_amount(session, message).await,
            ChatStep::DateInput => self.capture_date(session, message).await,
            ChatStep::DescriptionInput => self.capture_description(session, message).await,
            ChatStep::CardInfo => self.complete_dispute(session, message, &lower).await,
            ChatStep::TrackDispute => self.track_dispute(session, message).await,
        }
    }

    /// Writes the session at `step`.
    async fn save_at(
        &self,
        mut session: ChatSession,
        step: ChatStep,
    ) -> Result<ChatSession, ChatError> {
        let from = session.step;
        session.advance_to(step);
        let id = session.session_id.clone();
        let saved = self.sessions.update(&id, session).await?;
        tracing::debug!(session_id = %id, from = %from, to = %step, "Chat step advanced");
        Ok(saved)
    }

    async fn side_branch(
        &self,
        branch: SideBranch,
        session: ChatSession,
    ) -> Result<ChatReply, ChatError> {
        match branch {
            SideBranch::Track => {
                let session = self.save_at(session, ChatStep::TrackDispute).await?;
                Ok(ChatReply::text(replies::ask_dispute_id()).at(&session))
            }
            SideBranch::Guidance => Ok(ChatReply::text(replies::general_guidance())
                .with_options(options(&GUIDANCE_TOPICS))
                .at(&session)),
            SideBranch::Emergency => Ok(ChatReply::text(replies::emergency_help())
                .with_options(Bank::menu_options())
                .at(&session)),
            SideBranch::RestartReport => {
                let mut session = session;
                session.restart_form();
                let session = self.save_at(session, ChatStep::DisputeType).await?;
                Ok(ChatReply::text(replies::ask_dispute_type())
                    .with_options(DisputeType::menu_options())
                    .at(&session))
            }
        }
    }

    async fn greet(
        &self,
        session: ChatSession,
        message: &str,
        lower: &str,
    ) -> Result<ChatReply, ChatError> {
        if is_greeting(lower) {
            let session = self.save_at(session, ChatStep::MainMenu).await?;
            return Ok(ChatReply::text(replies::welcome())
                .with_options(options(&MAIN_MENU_OPTIONS))
                .at(&session));
        }

        let response = self
            .responder
            .respond(&session.session_id, message, &session.context)
            .await;
        Ok(ChatReply::text(response)
            .with_options(options(&MAIN_MENU_OPTIONS))
            .at(&session))
    }

    async fn select_dispute_type(
        &self,
        mut session: ChatSession,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        match extractors::parse_dispute_type(message) {
            Ok(dispute_type) => {
                session.dispute_form.dispute_type = Some(dispute_type);
                let session = self.save_at(session, ChatStep::BankSelection).await?;
                Ok(ChatReply::text(replies::ask_bank(dispute_type))
                    .with_options(Bank::menu_options())
                    .at(&session))
            }
            Err(e) => {
                tracing::debug!(session_id = %session.session_id, error = %e, "Dispute type not recognized");
                Ok(ChatReply::text(replies::reprompt_dispute_type())
                    .with_options(DisputeType::menu_options())
                    .at(&session))
            }
        }
    }

    async fn select_bank(
        &self,
        mut session: ChatSession,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        match extractors::parse_bank(message) {
            Ok(bank) => {
                session.dispute_form.bank = Some(bank);
                let session = self.save_at(session, ChatStep::AmountInput).await?;
                Ok(ChatReply::text(replies::ask_amount(bank)).at(&session))
            }
            Err(e) => {
                tracing::debug!(session_id = %session.session_id, error = %e, "Bank not recognized");
                Ok(ChatReply::text(replies::reprompt_bank())
                    .with_options(Bank::menu_options())
                    .at(&session))
            }
        }
    }

    async fn capture_amount(
        &self,
        mut session: ChatSession,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        match extractors::parse_amount(message) {
            Ok(amount) => {
                session.dispute_form.amount = Some(amount);
                let session = self.save_at(session, ChatStep::DateInput).await?;
                Ok(ChatReply::text(replies::ask_date(amount)).at(&session))
            }
            Err(_) => Ok(ChatReply::text(replies::reprompt_amount()).at(&session)),
        }
    }

    async fn capture_date(
        &self,
        mut session: ChatSession,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        match extractors::parse_date(message) {
            Ok(date) => {
                let response = replies::ask_description(&date);
                session.dispute_form.date = Some(date);
                let session = self.save_at(session, ChatStep::DescriptionInput).await?;
                Ok(ChatReply::text(response).at(&session))
            }
            Err(_) => Ok(ChatReply::text(replies::reprompt_date()).at(&session)),
        }
    }

    async fn capture_description(
        &self,
        mut session: ChatSession,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        match extractors::parse_description(message) {
            Ok(description) => {
                session.dispute_form.description = Some(description);
                let session = self.save_at(session, ChatStep::CardInfo).await?;
                Ok(ChatReply::text(replies::ask_card()).at(&session))
            }
            Err(_) => Ok(ChatReply::text(replies::reprompt_description()).at(&session)),
        }
    }

    /// Terminal step. The stored session is left exactly as it was unless
    /// the dispute record was persisted.
    async fn complete_dispute(
        &self,
        session: ChatSession,
        message: &str,
        lower: &str,
    ) -> Result<ChatReply, ChatError> {
        if lower == "try again" {
            return Ok(ChatReply::text(replies::ask_card()).at(&session));
        }
        let card = match extractors::parse_card_last_four(message) {
            Ok(card) => card,
            Err(_) => return Ok(ChatReply::text(replies::ask_card()).at(&session)),
        };

        let mut draft = session.dispute_form.clone();
        draft.card_last_four = Some(card);

        let form = match draft.to_form() {
            Ok(form) => form,
            Err(e) => {
                tracing::warn!(
                    session_id = %session.session_id,
                    field = e.field(),
                    "Dispute form incomplete, restarting intake"
                );
                let mut session = session;
                session.restart_form();
                let session = self.save_at(session, ChatStep::DisputeType).await?;
                return Ok(ChatReply::text(replies::form_incomplete())
                    .with_options(DisputeType::menu_options())
                    .at(&session));
            }
        };

        match self.create_dispute.handle(CreateDisputeCommand { form }).await {
            Ok(result) => {
                if let Err(e) = self.sessions.delete(&session.session_id).await {
                    tracing::error!(
                        session_id = %session.session_id,
                        dispute_id = %result.record.id,
                        error = %e,
                        "Dispute created but session could not be deleted"
                    );
                }
                let mut reply = ChatReply::text(replies::dispute_created(&result.record))
                    .for_session(&session.session_id, None);
                reply.action = Some(ACTION_DISPUTE_CREATED.to_string());
                reply.dispute_id = Some(result.record.id.to_string());
                Ok(reply)
            }
            Err(e) => {
                tracing::error!(
                    session_id = %session.session_id,
                    error = %e,
                    "Dispute creation failed, session kept at card_info"
                );
                Ok(ChatReply::text(replies::creation_failed())
                    .with_options(options(&RETRY_OPTIONS))
                    .at(&session))
            }
        }
    }

    async fn track_dispute(
        &self,
        session: ChatSession,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        let Ok(id) = DisputeId::parse(message) else {
            return Ok(ChatReply::text(replies::invalid_dispute_id()).at(&session));
        };

        let response = match self.disputes.get(&id).await? {
            Some(record) => replies::dispute_status(&record),
            None => replies::dispute_not_found(),
        };
        Ok(ChatReply::text(response).at(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::storage::{InMemoryDisputeRepository, InMemorySessionStore};
    use crate::domain::dispute::{DisputeStatus, NO_CARD};
    use std::time::Duration;

    struct Harness {
        sessions: Arc<InMemorySessionStore>,
        disputes: Arc<InMemoryDisputeRepository>,
        handler: ChatHandler,
    }

    fn harness_with(responder: FallbackResponder) -> Harness {
        let sessions = Arc::new(InMemorySessionStore::default());
        let disputes = Arc::new(InMemoryDisputeRepository::new());
        let handler = ChatHandler::new(sessions.clone(), disputes.clone(), Arc::new(responder));
        Harness {
            sessions,
            disputes,
            handler,
        }
    }

    fn harness() -> Harness {
        harness_with(FallbackResponder::static_only())
    }

    impl Harness {
        async fn send(&self, message: &str) -> ChatReply {
            self.handler
                .handle(ChatRequest::new(message).with_session_id("s-1"))
                .await
        }

        async fn step(&self) -> Option<ChatStep> {
            self.sessions
                .get(&SessionId::new("s-1").unwrap())
                .await
                .unwrap()
                .map(|s| s.step)
        }

        async fn session(&self) -> ChatSession {
            self.sessions
                .get(&SessionId::new("s-1").unwrap())
                .await
                .unwrap()
                .unwrap()
        }

        async fn advance_to_card_info(&self) {
            for message in [
                "hello",
                "Report a Dispute",
                "Double Debit / Duplicate Charge",
                "HDFC Bank",
                "5000",
                "2024-01-15",
                "test issue",
            ] {
                self.send(message).await;
            }
        }
    }

    #[tokio::test]
    async fn greeting_moves_to_main_menu() {
        let h = harness();
        let reply = h.send("Hello there").await;

        assert!(reply.response.starts_with("Hello! I'm your Banking Dispute Assistant"));
        assert_eq!(reply.options, Some(options(&MAIN_MENU_OPTIONS)));
        assert_eq!(h.step().await, Some(ChatStep::MainMenu));
        let context = reply.context.unwrap();
        assert_eq!(context["session_id"], "s-1");
        assert_eq!(context["step"], "main_menu");
    }

    #[tokio::test]
    async fn non_greeting_uses_ai_and_keeps_step() {
        let mock = Arc::new(MockAIProvider::new().with_response("I can help with that."));
        let h = harness_with(FallbackResponder::new(mock, Duration::from_secs(1)));

        let reply = h.send("what is a chargeback").await;

        assert_eq!(reply.response, "I can help with that.");
        assert_eq!(reply.options, Some(options(&MAIN_MENU_OPTIONS)));
        assert_eq!(h.step().await, Some(ChatStep::Greeting));
    }

    #[tokio::test]
    async fn greeting_words_must_be_whole_words() {
        let h = harness();
        h.send("this is nothing").await;
        assert_eq!(h.step().await, Some(ChatStep::Greeting));
    }

    #[tokio::test]
    async fn unavailable_ai_still_answers() {
        let mock = Arc::new(MockAIProvider::new().with_error(MockError::Unavailable {
            message: "connection refused".into(),
        }));
        let h = harness_with(FallbackResponder::new(mock, Duration::from_secs(1)));

        let reply = h.send("someone made a fraud payment").await;

        assert!(reply.response.starts_with("🚨"));
    }

    #[tokio::test]
    async fn report_a_dispute_lists_types() {
        let h = harness();
        h.send("hi").await;
        let reply = h.send("Report a Dispute").await;

        assert_eq!(reply.options, Some(DisputeType::menu_options()));
        assert_eq!(h.step().await, Some(ChatStep::DisputeType));
    }

    #[tokio::test]
    async fn main_menu_mismatch_delegates_to_greeting() {
        let h = harness();
        h.send("hi").await;
        let reply = h.send("start").await;

        assert!(reply.response.starts_with("Hello!"));
        assert_eq!(h.step().await, Some(ChatStep::MainMenu));
    }

    #[tokio::test]
    async fn unknown_dispute_type_reprompts() {
        let h = harness();
        h.send("hi").await;
        h.send("report a dispute").await;
        let reply = h.send("lottery").await;

        assert_eq!(reply.response, replies::reprompt_dispute_type());
        assert_eq!(reply.options, Some(DisputeType::menu_options()));
        assert_eq!(h.step().await, Some(ChatStep::DisputeType));
    }

    #[tokio::test]
    async fn unknown_bank_reprompts_with_bank_list() {
        let h = harness();
        h.send("hi").await;
        h.send("report a dispute").await;
        h.send("ATM Dispute").await;
        let reply = h.send("Moon Credit Union").await;

        assert_eq!(reply.response, replies::reprompt_bank());
        assert_eq!(reply.options, Some(Bank::menu_options()));
        assert_eq!(h.step().await, Some(ChatStep::BankSelection));
    }

    #[tokio::test]
    async fn bank_selection_shows_helpline() {
        let h = harness();
        h.send("hi").await;
        h.send("report a dispute").await;
        h.send("ATM Dispute").await;
        let reply = h.send("my bank is icici bank").await;

        assert!(reply.response.contains("1800 2000 888"));
        assert_eq!(h.session().await.dispute_form.bank, Some(Bank::Icici));
        assert_eq!(h.step().await, Some(ChatStep::AmountInput));
    }

    #[tokio::test]
    async fn invalid_amount_reprompts() {
        let h = harness();
        for m in ["hi", "report a dispute", "ATM Dispute", "SBI", "State Bank of India"] {
            h.send(m).await;
        }
        assert_eq!(h.step().await, Some(ChatStep::AmountInput));

        let reply = h.send("abc").await;
        assert_eq!(reply.response, replies::reprompt_amount());
        assert_eq!(h.step().await, Some(ChatStep::AmountInput));

        let reply = h.send("5,000").await;
        assert!(reply.response.contains("₹5,000.00"));
        assert_eq!(h.session().await.dispute_form.amount, Some(5000.0));
    }

    #[tokio::test]
    async fn short_date_reprompts() {
        let h = harness();
        for m in ["hi", "report a dispute", "Other", "Axis Bank", "100"] {
            h.send(m).await;
        }
        let reply = h.send("1/1/24").await;
        assert_eq!(reply.response, replies::reprompt_date());
        assert_eq!(h.step().await, Some(ChatStep::DateInput));
    }

    #[tokio::test]
    async fn description_keeps_original_case() {
        let h = harness();
        for m in ["hi", "report a dispute", "Other", "Axis Bank", "100", "15 Jan 2024"] {
            h.send(m).await;
        }
        h.send("  Merchant Charged Me Twice  ").await;

        let session = h.session().await;
        assert_eq!(session.dispute_form.date.as_deref(), Some("15 Jan 2024"));
        assert_eq!(
            session.dispute_form.description.as_deref(),
            Some("Merchant Charged Me Twice")
        );
        assert_eq!(session.step, ChatStep::CardInfo);
    }

    #[tokio::test]
    async fn full_flow_creates_one_dispute_and_deletes_session() {
        let h = harness();
        h.advance_to_card_info().await;
        assert_eq!(h.step().await, Some(ChatStep::CardInfo));

        let reply = h.send("1234").await;

        assert_eq!(reply.action.as_deref(), Some(ACTION_DISPUTE_CREATED));
        let id = reply.dispute_id.clone().unwrap();
        assert!(DisputeId::parse(&id).is_ok());
        assert!(reply.response.contains(&id));
        assert_eq!(h.disputes.len().await, 1);
        assert_eq!(h.step().await, None);

        let stored = h.disputes.get(&DisputeId::parse(&id).unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.card_last_four, "1234");
        assert_eq!(stored.amount, 5000.0);
        assert_eq!(stored.bank, Bank::Hdfc);
    }

    #[tokio::test]
    async fn card_sentinel_is_normalized() {
        let h = harness();
        h.advance_to_card_info().await;
        let reply = h.send("n/a").await;

        let id = DisputeId::parse(reply.dispute_id.as_deref().unwrap()).unwrap();
        let stored = h.disputes.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.card_last_four, NO_CARD);
    }

    #[tokio::test]
    async fn full_card_number_stores_trailing_digits() {
        let h = harness();
        h.advance_to_card_info().await;
        let reply = h.send("4111 1111 1111 9876").await;

        let id = DisputeId::parse(reply.dispute_id.as_deref().unwrap()).unwrap();
        let stored = h.disputes.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.card_last_four, "9876");
    }

    #[tokio::test]
    async fn persistence_failure_keeps_session_at_card_info() {
        let h = harness();
        h.advance_to_card_info().await;
        let before = h.session().await;
        h.disputes.set_fail_writes(true);

        let reply = h.send("1234").await;

        assert_eq!(reply.response, replies::creation_failed());
        assert_eq!(reply.options, Some(options(&RETRY_OPTIONS)));
        assert!(reply.action.is_none());
        assert_eq!(h.session().await, before);
        assert_eq!(h.disputes.len().await, 0);

        h.disputes.set_fail_writes(false);
        let reply = h.send("Try Again").await;
        assert_eq!(reply.response, replies::ask_card());
        let reply = h.send("1234").await;
        assert_eq!(reply.action.as_deref(), Some(ACTION_DISPUTE_CREATED));
    }

    #[tokio::test]
    async fn message_after_completion_starts_fresh_session() {
        let h = harness();
        h.advance_to_card_info().await;
        h.send("1234").await;

        let reply = h.send("1234").await;

        assert!(reply.action.is_none());
        assert_eq!(h.step().await, Some(ChatStep::Greeting));
        assert_eq!(h.disputes.len().await, 1);
    }

    #[tokio::test]
    async fn tracking_round_trip() {
        let h = harness();
        h.advance_to_card_info().await;
        let id = h.send("1234").await.dispute_id.unwrap();

        let reply = h.send("Track Existing Dispute").await;
        assert_eq!(reply.response, replies::ask_dispute_id());
        assert_eq!(h.step().await, Some(ChatStep::TrackDispute));

        let reply = h.send(&id.to_lowercase()).await;
        assert!(reply.response.contains("**Dispute Status**: Submitted"));
        assert!(reply.response.contains("✅ Submitted - "));
    }

    #[tokio::test]
    async fn tracking_unknown_and_malformed_ids() {
        let h = harness();
        h.send("track existing dispute").await;

        let reply = h.send("DSP00000000").await;
        assert_eq!(reply.response, replies::dispute_not_found());

        let reply = h.send("DSP123").await;
        assert_eq!(reply.response, replies::invalid_dispute_id());
        assert_eq!(h.step().await, Some(ChatStep::TrackDispute));
    }

    #[tokio::test]
    async fn guidance_and_emergency_do_not_change_step() {
        let h = harness();
        h.send("hi").await;
        h.send("report a dispute").await;
        h.send("ATM Dispute").await;

        let reply = h.send("Get Guidance").await;
        assert_eq!(reply.options, Some(options(&GUIDANCE_TOPICS)));
        assert_eq!(h.step().await, Some(ChatStep::BankSelection));

        let reply = h.send("Emergency Help").await;
        assert!(reply.response.contains("14448"));
        assert_eq!(reply.options, Some(Bank::menu_options()));
        assert_eq!(h.step().await, Some(ChatStep::BankSelection));
    }

    #[tokio::test]
    async fn report_a_dispute_mid_flow_restarts_form() {
        let h = harness();
        for m in ["hi", "report a dispute", "ATM Dispute", "Axis Bank"] {
            h.send(m).await;
        }
        h.send("Report a Dispute").await;

        let session = h.session().await;
        assert_eq!(session.step, ChatStep::DisputeType);
        assert!(session.dispute_form.is_empty());
    }

    #[tokio::test]
    async fn same_message_same_reply_in_same_step() {
        let h = harness();
        h.send("hi").await;
        h.send("report a dispute").await;

        let first = h.send("lottery").await;
        let second = h.send("lottery").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn session_store_failure_becomes_scripted_apology() {
        let h = harness();
        h.sessions.set_unavailable(true);

        let reply = h.send("hello").await;

        assert_eq!(reply.response, replies::technical_issue());
        assert_eq!(reply.options, Some(options(&RETRY_OPTIONS)));
    }

    #[tokio::test]
    async fn missing_session_id_generates_one() {
        let h = harness();
        let reply = h.handler.handle(ChatRequest::new("hello")).await;
        let context = reply.context.unwrap();
        let id = context["session_id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_ne!(id, "s-1");
    }

    #[tokio::test]
    async fn caller_context_is_merged_into_session() {
        let h = harness();
        let mut request = ChatRequest::new("hello").with_session_id("s-1");
        request.context.insert("channel".into(), Value::from("mobile"));
        h.handler.handle(request).await;

        assert_eq!(h.session().await.context["channel"], "mobile");
    }

    #[tokio::test]
    async fn tracked_status_reflects_updates() {
        let h = harness();
        h.advance_to_card_info().await;
        let id = DisputeId::parse(&h.send("1234").await.dispute_id.unwrap()).unwrap();
        h.disputes
            .update_status(&id, DisputeStatus::UnderReview)
            .await
            .unwrap();

        h.send("track existing dispute").await;
        let reply = h.send(id.as_str()).await;
        assert!(reply.response.contains("**Dispute Status**: Under Review"));
    }
}
