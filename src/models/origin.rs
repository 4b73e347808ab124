use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Problems turning text or request headers into an [`Origin`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OriginError {
    #[error("invalid origin '{value}': {reason}")]
    Parse { value: String, reason: String },

    #[error("origin '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("origin '{0}' has no host")]
    MissingHost(String),

    #[error("request carries no usable Origin or Host header")]
    MissingHeader,
}

/// The scheme, host and port the front-end is served from.
///
/// Paths, queries and fragments are dropped and default ports are omitted,
/// so `https://Example.com:443/app/` and `https://example.com` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    pub fn parse(value: &str) -> Result<Self, OriginError> {
        let url = Url::parse(value.trim()).map_err(|e| OriginError::Parse {
            value: value.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(OriginError::UnsupportedScheme(value.to_string()));
        }

        // IPv6 hosts keep their brackets here
        let host = match url.host() {
            Some(host) => host.to_string(),
            None => return Err(OriginError::MissingHost(value.to_string())),
        };

        Ok(Origin {
            scheme: url.scheme().to_string(),
            host,
            port: url.port(),
        })
    }

    /// Builds an origin from a scheme and an authority such as a `Host` header value.
    pub fn from_parts(scheme: &str, authority: &str) -> Result<Self, OriginError> {
        let authority = authority.trim();
        if authority.is_empty() {
            return Err(OriginError::MissingHost(format!("{}://", scheme)));
        }
        Self::parse(&format!("{}://{}", scheme.trim(), authority))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

impl FromStr for Origin {
    type Err = OriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Origin::parse(s)
    }
}
