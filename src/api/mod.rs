//! HTTP API layer

mod access_log;
mod routes;
mod handlers;

pub use handlers::{ErrorResponse, HealthResponse};
pub use routes::{create_router, ApiDoc, AppState};
