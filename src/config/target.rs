use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// A deployment tier. Exactly one is selected per running process.
#[derive(
    Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Production,
    Qa,
    Test,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Production, Target::Qa, Target::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Production => "production",
            Target::Qa => "qa",
            Target::Test => "test",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Target::Production),
            "qa" => Ok(Target::Qa),
            "test" => Ok(Target::Test),
            _ => Err(ConfigError::UnknownTarget(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("production".parse::<Target>().unwrap(), Target::Production);
        assert_eq!(" PROD ".parse::<Target>().unwrap(), Target::Production);
        assert_eq!("Qa".parse::<Target>().unwrap(), Target::Qa);
        assert_eq!("test".parse::<Target>().unwrap(), Target::Test);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "staging".parse::<Target>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTarget(ref name) if name == "staging"));
    }

    #[test]
    fn display_matches_serialized_form() {
        for target in Target::ALL {
            let json = serde_json::to_value(target).unwrap();
            assert_eq!(json, serde_json::Value::from(target.to_string()));
        }
    }
}
