//! Liveness endpoint.

use crate::state::AppState;
use axum::{routing::get, Router};

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// The resolver is validated before the server starts, so a running
/// instance is always healthy.
async fn health_check() -> &'static str {
    "OK"
}
