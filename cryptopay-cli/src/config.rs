//! CLI configuration.
//!
//! Loads settings from a TOML file with support for environment variable
//! expansion in string values. Variables use `$VAR` or `${VAR}` syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! token = "$CRYPTO_PAY_TOKEN"
//! network = "testnet"
//! timeout_secs = 15
//! ```
//!
//! Command-line flags and their environment variables (`CRYPTO_PAY_TOKEN`,
//! `CRYPTO_PAY_NETWORK`, `CRYPTO_PAY_BASE_URL`) override the file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cryptopay_http::{ClientConfig, Network};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cli::GlobalArgs;

/// Settings read from the config file.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// App API token. Supports `$VAR` / `${VAR}` expansion.
    pub token: Option<String>,

    /// Network to call (default: `mainnet`).
    pub network: Network,

    /// Base URL override.
    pub base_url: Option<Url>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unexpected keys.
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// No token was found in flags, environment or config file.
    #[error("No API token configured: pass --token, set CRYPTO_PAY_TOKEN or set `token` in the config file")]
    MissingToken,
}

impl CliConfig {
    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults. `$VAR` / `${VAR}` references are
    /// expanded from the process environment before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = if path.exists() {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            String::new()
        };
        Self::parse(path, &expand_env_vars(&content))
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Applies command-line flags (and their environment variables) on top
    /// of the file values.
    #[must_use]
    pub fn with_overrides(mut self, args: &GlobalArgs) -> Self {
        if let Some(token) = &args.token {
            self.token = Some(token.clone());
        }
        if let Some(network) = args.network() {
            self.network = network;
        }
        if let Some(base_url) = &args.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = Some(timeout);
        }
        self
    }

    /// Builds the HTTP client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] if no usable token is set.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let token = self.token.as_deref().map(str::trim).unwrap_or_default();
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if token.starts_with('$') {
            tracing::warn!("token not resolved (missing env var?)");
            return Err(ConfigError::MissingToken);
        }

        let mut config = ClientConfig::new(token).with_network(self.network);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("network", &self.network)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Expands `$VAR` and `${VAR}` patterns from the process environment.
fn expand_env_vars(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expands `$VAR` and `${VAR}` patterns using `lookup`.
///
/// Unresolved variables are left as-is.
fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut var_name = String::new();
        while let Some(&c) = chars.peek() {
            if braced {
                if c == '}' {
                    chars.next();
                    break;
                }
            } else if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            var_name.push(c);
            chars.next();
        }

        match lookup(&var_name).filter(|_| !var_name.is_empty()) {
            Some(value) => result.push_str(&value),
            None if braced && !var_name.is_empty() => {
                result.push_str("${");
                result.push_str(&var_name);
                result.push('}');
            }
            None => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&var_name);
            }
        }
    }

    result
}
