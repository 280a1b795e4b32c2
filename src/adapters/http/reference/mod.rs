//! HTTP adapter for guidance and bank directory endpoints.

mod handlers;
mod routes;

pub use handlers::BankListResponse;
pub use routes::reference_routes;
