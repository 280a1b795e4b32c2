//! HTTP routes for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat, ChatAppState};
use super::websocket::chat_ws_handler;

/// Creates the chat router (REST and websocket).
pub fn chat_routes(state: ChatAppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/ws/:session_id", get(chat_ws_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::http::chat::ChatResponse;
    use crate::adapters::storage::{InMemoryDisputeRepository, InMemorySessionStore};
    use crate::application::{ChatHandler, FallbackResponder};

    fn app() -> Router {
        let handler = ChatHandler::new(
            Arc::new(InMemorySessionStore::default()),
            Arc::new(InMemoryDisputeRepository::new()),
            Arc::new(FallbackResponder::static_only()),
        );
        chat_routes(ChatAppState::new(Arc::new(handler)))
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, ChatResponse) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn greeting_returns_main_menu() {
        let (status, body) =
            post_chat(app(), r#"{"message":"hello","session_id":"http-1"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.options.unwrap().len(), 4);
        let context = body.context.unwrap();
        assert_eq!(context["session_id"], "http-1");
        assert_eq!(context["step"], "main_menu");
    }

    #[tokio::test]
    async fn missing_session_id_is_generated() {
        let (status, body) = post_chat(app(), r#"{"message":"hi"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let context = body.context.unwrap();
        assert!(!context["session_id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_body_is_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
