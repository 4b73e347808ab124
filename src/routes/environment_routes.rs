//! Environment endpoints.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::debug;

use crate::config::Target;
use crate::models::{Environment, Origin};
use crate::state::AppState;

/// Registers environment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/environment", get(environment))
        .route("/environment.json", get(environment))
        .route("/target", get(target))
}

/// Returns the environment record as seen from the requesting origin.
async fn environment(origin: Origin, State(state): State<AppState>) -> Json<Environment> {
    debug!(
        "Resolving environment '{}' for origin {}",
        state.resolver.target(),
        origin
    );
    Json(state.resolver.resolve(&origin))
}

#[derive(Serialize)]
struct TargetResponse {
    target: Target,
    production: bool,
}

/// Reports which target this instance serves.
async fn target(State(state): State<AppState>) -> Json<TargetResponse> {
    Json(TargetResponse {
        target: state.resolver.target(),
        production: state.resolver.is_production(),
    })
}
