use thiserror::Error;

use super::Target;

/// Startup configuration failures. None of these are recoverable at runtime:
/// the process must not start with an undefined or malformed environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no environment target selected; set `target` in the config file or ENVRESOLVER_TARGET")]
    MissingTarget,

    #[error("unknown environment target '{0}' (expected production, qa or test)")]
    UnknownTarget(String),

    #[error("no settings configured for target '{0}'")]
    UnknownEnvironment(Target),

    #[error("invalid settings for target '{target}': {}", .problems.join("; "))]
    Invalid {
        target: Target,
        problems: Vec<String>,
    },

    #[error("invalid logging.level '{0}'. Valid values: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("invalid logging.format '{0}'. Valid values: json, console")]
    InvalidLogFormat(String),

    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
}
