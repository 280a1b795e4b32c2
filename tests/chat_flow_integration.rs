//! End-to-end dialogue tests through the public router.
//!
//! Drives the chat endpoint with in-memory stores and checks the dispute
//! that lands in the repository, the session lifecycle, and tracking.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use regex::Regex;
use serde_json::{json, Value};
use tower::ServiceExt;

use dispute_assistant::adapters::http::{create_router, AppState, HealthState, RouterOptions};
use dispute_assistant::adapters::{InMemoryDisputeRepository, InMemorySessionStore};
use dispute_assistant::application::{ChatHandler, FallbackResponder, ACTION_DISPUTE_CREATED};
use dispute_assistant::domain::foundation::SessionId;
use dispute_assistant::ports::{DisputeFilter, DisputeRepository, SessionStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SESSION: &str = "integration-session";

const FULL_FLOW: [&str; 8] = [
    "hello",
    "report a dispute",
    "Unauthorized Transaction",
    "HDFC Bank",
    "5000",
    "2024-01-15",
    "test issue",
    "1234",
];

struct TestApp {
    router: Router,
    sessions: Arc<InMemorySessionStore>,
    disputes: Arc<InMemoryDisputeRepository>,
}

impl TestApp {
    fn new() -> Self {
        let sessions = Arc::new(InMemorySessionStore::default());
        let disputes = Arc::new(InMemoryDisputeRepository::new());
        let handler = Arc::new(ChatHandler::new(
            sessions.clone(),
            disputes.clone(),
            Arc::new(FallbackResponder::static_only()),
        ));
        let health = HealthState {
            version: "test",
            environment: "development".to_string(),
            ai_provider: None,
        };
        let state = AppState::new(handler, disputes.clone(), health);
        let router = create_router(state, &RouterOptions::default());

        Self {
            router,
            sessions,
            disputes,
        }
    }

    async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn chat(&self, message: &str) -> Value {
        let body = json!({ "message": message, "session_id": SESSION });
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, json) = self.request(request).await;
        assert_eq!(status, StatusCode::OK, "chat must always answer 200");
        json
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.request(request).await
    }

    async fn session_step(&self) -> Option<String> {
        self.sessions
            .get(&SessionId::new(SESSION).unwrap())
            .await
            .unwrap()
            .map(|s| s.step.as_str().to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn full_dialogue_files_exactly_one_dispute() {
    let app = TestApp::new();

    let mut last = Value::Null;
    for message in FULL_FLOW {
        last = app.chat(message).await;
    }

    assert_eq!(last["action"], ACTION_DISPUTE_CREATED);
    let id = last["dispute_id"].as_str().unwrap().to_string();
    assert!(Regex::new(r"^DSP[0-9A-F]{8}$").unwrap().is_match(&id));

    let stored = app.disputes.list(&DisputeFilter::default()).await.unwrap();
    assert_eq!(stored.len(), 1);
    let record = &stored[0];
    assert_eq!(record.id.as_str(), id);
    assert_eq!(record.amount, 5000.0);
    assert_eq!(record.date, "2024-01-15");
    assert_eq!(record.description, "test issue");
    assert_eq!(record.card_last_four, "1234");

    assert!(app.session_step().await.is_none());
}

#[tokio::test]
async fn filed_dispute_is_visible_over_rest() {
    let app = TestApp::new();
    let mut last = Value::Null;
    for message in FULL_FLOW {
        last = app.chat(message).await;
    }
    let id = last["dispute_id"].as_str().unwrap();

    let (status, detail) = app.get(&format!("/api/dispute/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["dispute"]["id"], id);
    assert_eq!(detail["dispute"]["status"], "submitted");
    assert_eq!(detail["dispute"]["type"], "Unauthorized Transaction");

    let (status, list) = app.get("/api/disputes?bank=HDFC%20Bank").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn tracking_reports_submitted_status() {
    let app = TestApp::new();
    let mut last = Value::Null;
    for message in FULL_FLOW {
        last = app.chat(message).await;
    }
    let id = last["dispute_id"].as_str().unwrap().to_string();

    app.chat("Track Existing Dispute").await;
    assert_eq!(app.session_step().await.as_deref(), Some("track_dispute"));

    let reply = app.chat(&id).await;
    let text = reply["response"].as_str().unwrap();
    assert!(text.contains("**Dispute Status**: Submitted"));
}

#[tokio::test]
async fn persistence_failure_keeps_dialogue_at_card_step() {
    let app = TestApp::new();
    for message in &FULL_FLOW[..7] {
        app.chat(message).await;
    }
    app.disputes.set_fail_writes(true);

    let reply = app.chat("1234").await;

    assert!(reply.get("action").is_none());
    assert!(reply.get("dispute_id").is_none());
    assert_eq!(app.session_step().await.as_deref(), Some("card_info"));
    assert!(app.disputes.is_empty().await);

    app.disputes.set_fail_writes(false);
    let retry = app.chat("1234").await;
    assert_eq!(retry["action"], ACTION_DISPUTE_CREATED);
    assert_eq!(app.disputes.len().await, 1);
}

#[tokio::test]
async fn health_endpoint_reports_static_fallback() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ai"]["mode"], "static_fallback");
}
