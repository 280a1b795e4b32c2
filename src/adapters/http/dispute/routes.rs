//! HTTP routes for dispute endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    create_dispute, get_dispute, list_disputes, update_dispute_status, DisputeHandlers,
};

/// Creates the dispute router with all endpoints.
pub fn dispute_routes(handlers: DisputeHandlers) -> Router {
    Router::new()
        .route("/api/dispute", post(create_dispute))
        .route("/api/dispute/:id", get(get_dispute))
        .route("/api/dispute/:id/status", patch(update_dispute_status))
        .route("/api/disputes", get(list_disputes))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::adapters::storage::InMemoryDisputeRepository;

    const VALID_FORM: &str = r#"{
        "type": "Unauthorized Transaction",
        "bank": "State Bank of India",
        "amount": 100,
        "date": "2024-01-15",
        "description": "card used abroad",
        "cardlastfour": "9876"
    }"#;

    fn app_with(repo: Arc<InMemoryDisputeRepository>) -> Router {
        dispute_routes(DisputeHandlers::new(repo))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    #[tokio::test]
    async fn create_returns_201_with_priority() {
        let repo = Arc::new(InMemoryDisputeRepository::new());

        let (status, body) = send(app_with(repo.clone()), "POST", "/api/dispute", Some(VALID_FORM)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["priority"], "high");
        assert_eq!(body["status"], "submitted");
        assert_eq!(body["estimated_resolution"], "3-5 business days");
        assert_eq!(body["bank_contact"], "1800 1111 109");
        assert!(body["dispute_id"].as_str().unwrap().starts_with("DSP"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn create_with_unknown_bank_is_400() {
        let body = VALID_FORM.replace("State Bank of India", "Moon Bank");

        let (status, json) = send(
            app_with(Arc::new(InMemoryDisputeRepository::new())),
            "POST",
            "/api/dispute",
            Some(&body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn create_when_store_fails_is_500() {
        let repo = Arc::new(InMemoryDisputeRepository::new());
        repo.set_fail_writes(true);

        let (status, _) = send(app_with(repo), "POST", "/api/dispute", Some(VALID_FORM)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn get_returns_timeline() {
        let repo = Arc::new(InMemoryDisputeRepository::new());
        let (_, created) = send(app_with(repo.clone()), "POST", "/api/dispute", Some(VALID_FORM)).await;
        let id = created["dispute_id"].as_str().unwrap();

        let (status, body) = send(app_with(repo), "GET", &format!("/api/dispute/{}", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dispute"]["id"], id);
        assert_eq!(body["timeline"][0]["status"], "Submitted");
        assert_eq!(body["progress_percentage"], 25);
    }

    #[tokio::test]
    async fn get_unknown_is_404_and_malformed_is_400() {
        let app = app_with(Arc::new(InMemoryDisputeRepository::new()));

        let (status, _) = send(app.clone(), "GET", "/api/dispute/DSP00000000", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app, "GET", "/api/dispute/12345", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_filters_and_summarizes() {
        let repo = Arc::new(InMemoryDisputeRepository::new());
        send(app_with(repo.clone()), "POST", "/api/dispute", Some(VALID_FORM)).await;

        let (status, body) = send(
            app_with(repo),
            "GET",
            "/api/disputes?status=submitted&bank=state%20bank%20of%20india",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["summary"]["by_priority"]["high"], 1);
    }

    #[tokio::test]
    async fn status_update_moves_forward_and_rejects_backward() {
        let repo = Arc::new(InMemoryDisputeRepository::new());
        let (_, created) = send(app_with(repo.clone()), "POST", "/api/dispute", Some(VALID_FORM)).await;
        let uri = format!("/api/dispute/{}/status", created["dispute_id"].as_str().unwrap());

        let (status, body) = send(
            app_with(repo.clone()),
            "PATCH",
            &uri,
            Some(r#"{"status":"under_review"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dispute"]["status"], "under_review");

        let (status, _) = send(app_with(repo), "PATCH", &uri, Some(r#"{"status":"submitted"}"#)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
