use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use envresolver::config::{extract_config, ConfigV1, BUILTIN_CONFIG};
use envresolver::resolver::EnvironmentResolver;
use envresolver::routes::create_router;
use envresolver::state::AppState;
use figment::providers::{Format, Yaml};
use figment::Figment;
use serde_json::Value;

/// Built-in targets with `overrides` layered on top, as a config file would be.
pub fn load_test_config(overrides: &str) -> ConfigV1 {
    extract_config(
        &Figment::new()
            .merge(Yaml::string(BUILTIN_CONFIG))
            .merge(Yaml::string(overrides)),
    )
    .expect("Failed to parse test config YAML")
}

pub fn build_app(config: ConfigV1) -> Router {
    let resolver = EnvironmentResolver::from_config(&config).expect("config should resolve");
    let state = AppState {
        config: Arc::new(config),
        resolver: Arc::new(resolver),
    };
    create_router(state)
}

pub fn request_with_headers(path: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
