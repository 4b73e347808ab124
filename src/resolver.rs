//! Selection of the single active environment record.
//!
//! The resolver is built once at startup from the configured target and its
//! validated settings, then shared read-only. Resolving never touches the
//! network: the only runtime input is the origin the front-end is served
//! from, which becomes `auth0.redirectUri`.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::{ConfigError, ConfigV1, Target, TargetSettings};
use crate::models::{Auth0Config, Environment, Origin};

#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    target: Target,
    settings: TargetSettings,
}

impl EnvironmentResolver {
    /// Picks exactly `target` out of `environments` and validates it.
    /// There is no fallback to, or merging with, any other target.
    pub fn new(
        target: Target,
        environments: &BTreeMap<Target, TargetSettings>,
    ) -> Result<Self, ConfigError> {
        let settings = environments
            .get(&target)
            .ok_or(ConfigError::UnknownEnvironment(target))?;
        settings.validate(target)?;

        info!(
            "Selected environment target '{}' (production={}, backend={})",
            target, settings.production, settings.auth0.backend
        );

        Ok(Self {
            target,
            settings: settings.clone(),
        })
    }

    pub fn from_config(config: &ConfigV1) -> Result<Self, ConfigError> {
        Self::new(config.selected_target()?, &config.environments)
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn settings(&self) -> &TargetSettings {
        &self.settings
    }

    pub fn is_production(&self) -> bool {
        self.settings.production
    }

    /// The environment record as seen from `origin`.
    pub fn resolve(&self, origin: &Origin) -> Environment {
        let auth0 = &self.settings.auth0;
        Environment {
            production: self.settings.production,
            auth0: Auth0Config {
                domain: auth0.domain.clone(),
                client_id: auth0.client_id.clone(),
                redirect_uri: origin.to_string(),
                audience: auth0.audience.clone(),
                scope: auth0.scope.clone(),
                backend: auth0.backend.clone(),
            },
            site_url: self.settings.site_url.clone(),
        }
    }
}
