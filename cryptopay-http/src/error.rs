//! Error types for the HTTP transport layer.

use cryptopay::{ApiError, EnvelopeError};
use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;

/// Errors that can occur while calling the Crypto Pay API.
#[derive(Debug, thiserror::Error)]
pub enum CryptoPayError {
    /// No API token was configured.
    #[error("API token is empty")]
    MissingToken,

    /// The API token cannot be sent as an HTTP header value.
    #[error("API token is not a valid header value: {0}")]
    InvalidToken(#[source] InvalidHeaderValue),

    /// URL parse error.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// HTTP transport error.
    #[error("HTTP error: {method}: {source}")]
    Http {
        /// The remote method being called.
        method: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Failed to read the response body.
    #[error("Failed to read response body: {method}: {source}")]
    ResponseBodyRead {
        /// The remote method being called.
        method: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// A successful response did not match the expected envelope.
    #[error("Failed to deserialize JSON: {method}: {source}")]
    Json {
        /// The remote method being called.
        method: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A non-success status with a body that is not an envelope.
    #[error("Unexpected HTTP status {status}: {method}: {body}")]
    HttpStatus {
        /// The remote method being called.
        method: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },

    /// The service answered with an unsuccessful envelope.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

impl CryptoPayError {
    /// Returns the remote error code and name, if the service reported one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Envelope(EnvelopeError::Api(err)) => Some(err),
            _ => None,
        }
    }

    /// Returns the remote method the error relates to, if any.
    #[must_use]
    pub const fn method(&self) -> Option<&'static str> {
        match self {
            Self::Http { method, .. }
            | Self::ResponseBodyRead { method, .. }
            | Self::Json { method, .. }
            | Self::HttpStatus { method, .. }
            | Self::Envelope(
                EnvelopeError::Api(ApiError { method, .. }) | EnvelopeError::MissingResult { method },
            ) => Some(*method),
            Self::MissingToken
            | Self::InvalidToken(_)
            | Self::UrlParse { .. }
            | Self::ClientBuild(_) => None,
        }
    }
}
