use std::fmt;

use schemars::JsonSchema;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{ConfigError, Target};

/// Identity-provider settings for one target. The redirect URI is not part
/// of this: it is taken from the runtime origin on every resolution.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct Auth0Settings {
    #[serde(deserialize_with = "string_or_scalar")]
    pub domain: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub client_id: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub audience: String,
    /// Space-separated permission identifiers.
    #[serde(deserialize_with = "string_or_scalar")]
    pub scope: String,
    /// Base URL of the API server for this target.
    pub backend: String,
}

/// The configured values of one deployment target.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct TargetSettings {
    pub production: bool,
    pub auth0: Auth0Settings,
    /// Public base URL of the front-end.
    pub site_url: String,
}

impl TargetSettings {
    /// Checks every field and reports all problems at once.
    pub fn validate(&self, target: Target) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        require_non_empty(&mut problems, "auth0.domain", &self.auth0.domain);
        require_non_empty(&mut problems, "auth0.client_id", &self.auth0.client_id);
        require_non_empty(&mut problems, "auth0.audience", &self.auth0.audience);
        require_non_empty(&mut problems, "auth0.scope", &self.auth0.scope);
        require_http_url(&mut problems, "auth0.backend", &self.auth0.backend);
        require_http_url(&mut problems, "site_url", &self.site_url);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { target, problems })
        }
    }
}

/// Environment overrides are parsed, so `ENVRESOLVER_..._CLIENT_ID=123456`
/// arrives as a number. Text fields take any scalar in its written form.
fn string_or_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

fn require_non_empty(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{} is empty", field));
    }
}

fn require_http_url(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{} is empty", field));
        return;
    }
    match Url::parse(value) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            problems.push(format!(
                "{} must use http or https, got '{}'",
                field,
                url.scheme()
            ));
        }
        Ok(url) if url.host_str().map_or(true, str::is_empty) => {
            problems.push(format!("{} has no host: '{}'", field, value));
        }
        Ok(_) => {}
        Err(e) => problems.push(format!("{} is not a valid URL '{}': {}", field, value, e)),
    }
}
