//! Client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TIMEOUT, MAINNET_API_URL, TESTNET_API_URL};

/// Which Crypto Pay deployment to talk to.
///
/// Tokens are issued per network: a `@CryptoTestnetBot` token is rejected by
/// the mainnet API and vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network (`@CryptoBot`).
    #[default]
    Mainnet,
    /// Test network (`@CryptoTestnetBot`).
    Testnet,
}

impl Network {
    /// Returns the API base URL of this network.
    #[must_use]
    pub const fn api_url(self) -> &'static str {
        match self {
            Self::Mainnet => MAINNET_API_URL,
            Self::Testnet => TESTNET_API_URL,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => f.write_str("mainnet"),
            Self::Testnet => f.write_str("testnet"),
        }
    }
}

/// Error returned when parsing an unknown network name.
#[derive(Debug, thiserror::Error)]
#[error("unknown network {0:?}, expected \"mainnet\" or \"testnet\"")]
pub struct NetworkParseError(String);

impl FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(NetworkParseError(s.to_owned())),
        }
    }
}

/// Configuration for [`CryptoPayClient`](crate::CryptoPayClient).
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use cryptopay_http::{ClientConfig, Network};
///
/// let config = ClientConfig::new("1234:AAAA")
///     .with_network(Network::Testnet)
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.network, Network::Testnet);
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// App API token issued by the Crypto Bot.
    pub token: String,

    /// Network selecting the default base URL.
    pub network: Network,

    /// Base URL override (e.g., a proxy or a mock server). Takes precedence
    /// over `network`.
    pub base_url: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Optional pre-configured reqwest client. If `None`, a new client is
    /// created.
    pub http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Creates a mainnet config for `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            network: Network::Mainnet,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            http_client: None,
        }
    }

    /// Selects the network.
    #[must_use]
    pub const fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Returns the base URL requests will be sent to.
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.network.api_url())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("network", &self.network)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("has_http_client", &self.http_client.is_some())
            .finish()
    }
}
