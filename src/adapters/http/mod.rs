//! HTTP adapters - REST and websocket endpoints.
//!
//! Each area has its own adapter module; `router` assembles them with the
//! shared tower layers.

pub mod chat;
pub mod dispute;
mod error;
pub mod health;
pub mod reference;
mod router;

pub use error::{dispute_error_response, ErrorResponse};
pub use health::HealthState;
pub use router::{create_router, AppState, RouterOptions};
