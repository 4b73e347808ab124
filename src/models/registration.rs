//! Wire shapes of the registration API: rejected submissions and
//! identifier availability checks.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One validation failure tied to a named input field.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body returned when a registration submission is rejected.
///
/// `field_errors` is always present on the wire, possibly empty when the
/// failure is not attributable to a specific field. The UI shows `message`
/// in either case.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct RegistrationErrorResponse {
    pub message: String,
    #[serde(default)]
    pub field_errors: Vec<FieldError>,
}

impl RegistrationErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        RegistrationErrorResponse {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn with_field_error(
        mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.field_errors.push(FieldError::new(field, message));
        self
    }

    pub fn is_field_specific(&self) -> bool {
        !self.field_errors.is_empty()
    }

    /// Errors for one input field, in their original order.
    pub fn errors_for<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.field_errors.iter().filter(move |e| e.field == field)
    }
}

/// Result of checking whether a candidate identifier is free.
///
/// A negative result is a normal outcome, not an error. It may carry
/// advisory field errors.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
}

impl AvailabilityResponse {
    pub fn available() -> Self {
        AvailabilityResponse {
            available: true,
            field_errors: None,
        }
    }

    /// An unavailable identifier. `field_errors` is only kept when non-empty.
    pub fn unavailable(field_errors: Vec<FieldError>) -> Self {
        AvailabilityResponse {
            available: false,
            field_errors: (!field_errors.is_empty()).then_some(field_errors),
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        self.field_errors.as_deref().unwrap_or_default()
    }
}

/// JSON schemas of the registration wire types, keyed by type name.
pub fn wire_schema() -> Result<String, serde_json::Error> {
    let schemas = serde_json::json!({
        "FieldError": schemars::schema_for!(FieldError),
        "RegistrationErrorResponse": schemars::schema_for!(RegistrationErrorResponse),
        "AvailabilityResponse": schemars::schema_for!(AvailabilityResponse),
    });
    serde_json::to_string_pretty(&schemas)
}
