//! Shared JSON error body and the `DisputeError` → HTTP status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::DisputeError;

/// Error body for every non-2xx JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Maps handler errors onto status codes. Persistence details are logged,
/// never echoed to the client.
pub fn dispute_error_response(error: DisputeError) -> Response {
    match error {
        DisputeError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::bad_request(e.to_string())
                    .with_details(serde_json::json!({ "field": e.field() })),
            ),
        )
            .into_response(),
        DisputeError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Dispute", &id)),
        )
            .into_response(),
        DisputeError::InvalidTransition(msg) => {
            (StatusCode::CONFLICT, Json(ErrorResponse::conflict(msg))).into_response()
        }
        DisputeError::Persistence(e) => {
            tracing::error!(error = %e, "Dispute persistence failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Failed to process dispute")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ValidationError};

    #[test]
    fn validation_maps_to_400() {
        let response =
            dispute_error_response(ValidationError::empty_field("date").into());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = dispute_error_response(DisputeError::not_found("DSP00000000"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_transition_maps_to_409() {
        let response = dispute_error_response(DisputeError::InvalidTransition("no".into()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn persistence_maps_to_500() {
        let response =
            dispute_error_response(DisputeError::Persistence(DomainError::database("down")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_message_names_resource() {
        let error = ErrorResponse::not_found("Dispute", "DSP12345678");
        assert_eq!(error.code, "NOT_FOUND");
        assert!(error.message.contains("DSP12345678"));
    }
}
