//! Liveness endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::ports::ProviderInfo;

/// What the health endpoint reports about this process.
#[derive(Debug, Clone)]
pub struct HealthState {
    pub version: &'static str,
    pub environment: String,
    pub ai_provider: Option<ProviderInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub timestamp: String,
    pub ai: AiStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiStatus {
    /// `"configured"` or `"static_fallback"`.
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// GET /api/health and GET /
pub async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    let ai = match state.ai_provider {
        Some(info) => AiStatus {
            mode: "configured",
            provider: Some(info.name),
            model: Some(info.model),
        },
        None => AiStatus {
            mode: "static_fallback",
            provider: None,
            model: None,
        },
    };

    Json(HealthResponse {
        status: "healthy",
        version: state.version,
        environment: state.environment,
        timestamp: Timestamp::now().to_rfc3339(),
        ai,
    })
}

pub fn health_routes(state: HealthState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .with_state(state)
}
