use std::{env, fmt, net::SocketAddr};

use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Credentials for the external language-model API the globe view talks to.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads `GLOBETELLER_API_KEY` and `GLOBETELLER_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_key: lookup("GLOBETELLER_API_KEY").filter(|key| !key.is_empty()),
            base_url: lookup("GLOBETELLER_BASE_URL")
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.base_url),
        }
    }

    pub fn public_view(&self) -> PublicConfig {
        PublicConfig {
            base_url: self.base_url.clone(),
            has_api_key: self.api_key.is_some(),
        }
    }
}

// Never print the key itself.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "base_url: {}", self.base_url)?;
        write!(
            f,
            "api_key:  {}",
            if self.api_key.is_some() { "<set>" } else { "<unset>" }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub base_url: String,
    pub has_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid GLOBETELLER_ADDR {value:?}: {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub client: ClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = lookup("GLOBETELLER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = value
            .parse()
            .map_err(|source| ConfigError::InvalidAddr { value, source })?;
        Ok(Self {
            addr,
            client: ClientConfig::from_lookup(lookup),
        })
    }
}
