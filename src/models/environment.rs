use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity-provider parameters as handed to the front-end.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Auth0Config {
    pub domain: String,
    pub client_id: String,
    /// The origin the front-end is served from at resolution time.
    pub redirect_uri: String,
    pub audience: String,
    pub scope: String,
    pub backend: String,
}

/// The resolved, read-only environment record of a running instance.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub production: bool,
    pub auth0: Auth0Config,
    pub site_url: String,
}

impl Environment {
    /// The individual permission identifiers of `auth0.scope`.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.auth0.scope.split_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn environment() -> Environment {
        Environment {
            production: false,
            auth0: Auth0Config {
                domain: "test-placeholder".into(),
                client_id: "client".into(),
                redirect_uri: "http://localhost:4200".into(),
                audience: "https://api.example.com".into(),
                scope: "openid  profile\temail".into(),
                backend: "https://api.test.example.com".into(),
            },
            site_url: "https://test.example.com".into(),
        }
    }

    #[test]
    fn serializes_with_front_end_key_names() {
        let value = serde_json::to_value(environment()).unwrap();
        assert_eq!(
            value,
            json!({
                "production": false,
                "auth0": {
                    "domain": "test-placeholder",
                    "clientId": "client",
                    "redirectUri": "http://localhost:4200",
                    "audience": "https://api.example.com",
                    "scope": "openid  profile\temail",
                    "backend": "https://api.test.example.com"
                },
                "siteUrl": "https://test.example.com"
            })
        );
    }

    #[test]
    fn scopes_split_on_any_whitespace() {
        let env = environment();
        let scopes: Vec<&str> = env.scopes().collect();
        assert_eq!(scopes, vec!["openid", "profile", "email"]);
    }
}
