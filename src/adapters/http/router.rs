//! Top-level router: every endpoint plus the shared tower layers.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::ChatHandler;
use crate::ports::DisputeRepository;

use super::chat::{chat_routes, ChatAppState};
use super::dispute::{dispute_routes, DisputeHandlers};
use super::health::{health_routes, HealthState};
use super::reference::reference_routes;

/// Everything the HTTP surface needs.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatAppState,
    pub disputes: DisputeHandlers,
    pub health: HealthState,
}

impl AppState {
    pub fn new(
        chat_handler: Arc<ChatHandler>,
        disputes: Arc<dyn DisputeRepository>,
        health: HealthState,
    ) -> Self {
        Self {
            chat: ChatAppState::new(chat_handler),
            disputes: DisputeHandlers::new(disputes),
            health,
        }
    }
}

/// Layer settings taken from the server configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Option<Duration>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(allowed)
    }
}

pub fn create_router(state: AppState, options: &RouterOptions) -> Router {
    let mut bounded = Router::new()
        .merge(dispute_routes(state.disputes))
        .merge(reference_routes())
        .merge(health_routes(state.health));

    // Chat is bounded by the AI timeout inside the handler and must always
    // answer with a scripted reply, so it stays outside the request timeout.
    if let Some(timeout) = options.request_timeout {
        bounded = bounded.layer(TimeoutLayer::new(timeout));
    }

    Router::new()
        .merge(chat_routes(state.chat))
        .merge(bounded)
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}
