//! Application startup and server initialization.
//!
//! The configuration and resolver are built and validated by the caller
//! before anything here runs; this module only wires them into the router
//! and serves it.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::resolver::EnvironmentResolver;
use crate::routes;
use crate::state::AppState;

/// Runs the HTTP server until it fails or the process is stopped.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error during execution.
pub async fn run(
    config: Arc<ConfigV1>,
    resolver: Arc<EnvironmentResolver>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Starting server on {} for target '{}'",
        config.bind_address,
        resolver.target()
    );

    let listener = TcpListener::bind(&config.bind_address).await?;
    let app = routes::create_router(AppState { config, resolver });

    axum::serve(listener, app).await?;

    Ok(())
}
