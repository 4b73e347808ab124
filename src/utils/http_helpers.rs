use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

use crate::models::{Origin, OriginError};
use crate::state::AppState;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Converts our `HTTPError` into a JSON `{"error": ...}` response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<OriginError> for HTTPError {
    fn from(e: OriginError) -> Self {
        HTTPError::new(StatusCode::BAD_REQUEST, e.to_string())
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// First entry of a comma-separated proxy header.
fn first_forwarded<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    header(headers, name)
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Works out the origin the front-end was served from.
///
/// The browser's `Origin` header wins. An opaque `null` origin (sandboxed
/// frames, privacy-restricted contexts) counts as absent. With
/// `trust_forwarded` set, `X-Forwarded-Proto`/`X-Forwarded-Host` come next,
/// then `Host` over plain http.
pub fn origin_from_headers(
    headers: &HeaderMap,
    trust_forwarded: bool,
) -> Result<Origin, OriginError> {
    let browser_origin = header(headers, "origin").filter(|o| !o.eq_ignore_ascii_case("null"));
    if let Some(origin) = browser_origin {
        return Origin::parse(origin);
    }

    if trust_forwarded {
        let forwarded_host = first_forwarded(headers, "x-forwarded-host");
        let forwarded_proto = first_forwarded(headers, "x-forwarded-proto");
        if forwarded_host.is_some() || forwarded_proto.is_some() {
            let host = forwarded_host
                .or_else(|| header(headers, "host"))
                .ok_or(OriginError::MissingHeader)?;
            return Origin::from_parts(forwarded_proto.unwrap_or("http"), host);
        }
    }

    match header(headers, "host") {
        Some(host) => Origin::from_parts("http", host),
        None => Err(OriginError::MissingHeader),
    }
}

/// Extractor implementation: resolves the request's origin from its headers.
#[async_trait]
impl FromRequestParts<AppState> for Origin {
    type Rejection = HTTPError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        state: &AppState,
    ) -> Result<Origin, HTTPError> {
        let origin = origin_from_headers(&parts.headers, state.config.trust_forwarded_headers)
            .map_err(|e| {
                debug!("Rejecting request without a usable origin: {}", e);
                HTTPError::from(e)
            })?;
        Ok(origin)
    }
}
