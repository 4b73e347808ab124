//! Shared application state.
//!
//! Holds the configuration and the environment resolver selected at startup.
//! Both are read-only for the lifetime of the process.

use crate::config::ConfigV1;
use crate::resolver::EnvironmentResolver;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Resolver for the single target this process serves.
    pub resolver: Arc<EnvironmentResolver>,
}
