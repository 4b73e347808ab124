use std::collections::BTreeMap;
use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::logging::LoggingConfig;
use super::settings::TargetSettings;
use super::{ConfigError, Target};

/// Settings for every target shipped with the binary. Files and environment
/// variables are layered on top of these.
pub const BUILTIN_CONFIG: &str = include_str!("builtin.yaml");

/// Prefix of environment variables that override configuration keys.
/// Nested keys are separated by `__`, e.g. `ENVRESOLVER_ENVIRONMENTS__QA__SITE_URL`.
pub const ENV_PREFIX: &str = "ENVRESOLVER_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: the selected target plus the values of every target.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    /// Deployment target of this process. Required before the resolver can start.
    #[serde(default)]
    pub target: Option<Target>,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Take the request origin from `X-Forwarded-Proto`/`X-Forwarded-Host`
    /// when running behind a reverse proxy.
    #[serde(default)]
    pub trust_forwarded_headers: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub environments: BTreeMap<Target, TargetSettings>,
}

impl ConfigV1 {
    pub fn selected_target(&self) -> Result<Target, ConfigError> {
        self.target.ok_or(ConfigError::MissingTarget)
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

/// Builds the layered configuration: built-in targets, then the YAML file at
/// `path` (skipped when it does not exist), then `ENVRESOLVER_*` variables.
pub fn figment(path: impl AsRef<Path>) -> Figment {
    Figment::new()
        .merge(Yaml::string(BUILTIN_CONFIG))
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load config from the YAML file at `path`, layered as described in [`figment`].
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, ConfigError> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    extract_config(&figment(path))
}

/// Extracts and migrates a versioned configuration from any figment.
pub fn extract_config(figment: &Figment) -> Result<ConfigV1, ConfigError> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// The JSON schema of the configuration document.
pub fn config_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(Config))
}
