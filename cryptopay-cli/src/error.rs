//! CLI error type.

use cryptopay_http::CryptoPayError;

use crate::config::ConfigError;

/// Errors that end a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] CryptoPayError),

    /// The result could not be written as JSON.
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
