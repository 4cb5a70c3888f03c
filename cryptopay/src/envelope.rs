//! The response envelope shared by every Crypto Pay API method.
//!
//! Every response body has the shape
//!
//! ```json
//! {"ok": true, "result": ...}
//! {"ok": false, "error": {"code": 401, "name": "UNAUTHORIZED"}}
//! ```
//!
//! [`ApiResponse::into_result`] branches on `ok` and turns the failure case
//! into an [`ApiError`] carrying the remote code and name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A decoded response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,

    /// The method result (present when `ok` is `true`).
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,

    /// Error details (present when `ok` is `false`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful envelope.
    #[must_use]
    pub const fn success(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    /// Creates a failed envelope.
    #[must_use]
    pub fn failure(code: i64, name: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(ApiErrorBody {
                code,
                name: name.into(),
            }),
        }
    }

    /// Unwraps the envelope for the method named `method`.
    ///
    /// A failed envelope without an `error` object yields code `0` and an
    /// empty name.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Api`] if `ok` is `false`, and
    /// [`EnvelopeError::MissingResult`] if `ok` is `true` but no result was sent.
    pub fn into_result(self, method: &'static str) -> Result<T, EnvelopeError> {
        if self.ok {
            return self.result.ok_or(EnvelopeError::MissingResult { method });
        }
        let body = self.error.unwrap_or_default();
        Err(EnvelopeError::Api(ApiError::new(method, body.code, body.name)))
    }
}

/// The `error` object of a failed envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Numeric error code (usually mirrors the HTTP status).
    #[serde(default)]
    pub code: i64,

    /// Machine-readable error name (e.g., `"INSUFFICIENT_FUNDS"`).
    #[serde(default)]
    pub name: String,
}

/// A failure reported by the service for a specific method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The remote method that failed (e.g., `"createCheck"`).
    pub method: &'static str,
    /// Remote error code.
    pub code: i64,
    /// Remote error name.
    pub name: String,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(method: &'static str, code: i64, name: impl Into<String>) -> Self {
        Self {
            method,
            code,
            name: name.into(),
        }
    }

    /// Returns `true` if the service rejected the API token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.code == 401 || self.name == "UNAUTHORIZED"
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} request error: code - {}, name - {}",
            self.method, self.code, self.name
        )
    }
}

impl std::error::Error for ApiError {}

/// Errors produced while unwrapping an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// The service answered with `ok: false`.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The service answered with `ok: true` but without a `result`.
    #[error("{method} request error: successful response carries no result")]
    MissingResult {
        /// The remote method that was called.
        method: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_yields_result() {
        let response: ApiResponse<bool> = serde_json::from_str(r#"{"ok":true,"result":true}"#).unwrap();
        assert!(response.into_result("deleteInvoice").unwrap());
    }

    #[test]
    fn test_failure_envelope_carries_code_and_name() {
        let response: ApiResponse<bool> =
            serde_json::from_str(r#"{"ok":false,"error":{"code":400,"name":"INVOICE_NOT_FOUND"}}"#)
                .unwrap();
        let err = response.into_result("deleteInvoice").unwrap_err();
        assert_eq!(
            err,
            EnvelopeError::Api(ApiError::new("deleteInvoice", 400, "INVOICE_NOT_FOUND"))
        );
        assert_eq!(
            err.to_string(),
            "deleteInvoice request error: code - 400, name - INVOICE_NOT_FOUND"
        );
    }

    #[test]
    fn test_failure_without_error_object_uses_defaults() {
        let response: ApiResponse<bool> = serde_json::from_str(r#"{"ok":false}"#).unwrap();
        let err = response.into_result("getMe").unwrap_err();
        assert_eq!(err, EnvelopeError::Api(ApiError::new("getMe", 0, "")));
    }

    #[test]
    fn test_success_without_result_is_an_error() {
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(
            response.into_result("getStats"),
            Err(EnvelopeError::MissingResult { method: "getStats" })
        );
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ApiError::new("getMe", 401, "UNAUTHORIZED").is_unauthorized());
        assert!(!ApiError::new("transfer", 400, "INSUFFICIENT_FUNDS").is_unauthorized());
    }

    #[test]
    fn test_constructors_serialize_to_wire_shape() {
        let ok = serde_json::to_value(ApiResponse::success(3)).unwrap();
        assert_eq!(ok, serde_json::json!({"ok": true, "result": 3}));

        let failed = serde_json::to_value(ApiResponse::<u8>::failure(401, "UNAUTHORIZED")).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({"ok": false, "error": {"code": 401, "name": "UNAUTHORIZED"}})
        );
    }
}
