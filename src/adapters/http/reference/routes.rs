//! HTTP routes for reference data.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_guidance, list_banks};

pub fn reference_routes() -> Router {
    Router::new()
        .route("/api/guidance/:dispute_type", post(get_guidance))
        .route("/api/banks", get(list_banks))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn call(method: &str, uri: &str) -> (StatusCode, Value) {
        let response = reference_routes()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
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
    async fn guidance_for_known_type() {
        let (status, body) = call("POST", "/api/guidance/ATM%20Dispute").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dispute_type"], "ATM Dispute");
        assert!(!body["guidance_steps"].as_array().unwrap().is_empty());
        assert!(body["complaint_template"].is_string());
        assert!(body["time_limits"].is_object());
    }

    #[tokio::test]
    async fn guidance_for_unknown_type_is_generic() {
        let (status, body) = call("POST", "/api/guidance/lottery").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dispute_type"], "General Dispute");
    }

    #[tokio::test]
    async fn banks_lists_every_bank() {
        let (status, body) = call("GET", "/api/banks").await;

        assert_eq!(status, StatusCode::OK);
        let banks = body["banks"].as_array().unwrap();
        assert_eq!(banks.len(), 8);
        assert_eq!(banks[1]["name"], "HDFC Bank");
        assert!(banks[7]["dispute_email"].is_null());
    }
}
