//! An async client for the Crypto Pay API.
//!
//! [`CryptoPayClient`] sends every method as `GET <base>/<method>?<query>`
//! with the app token in the `Crypto-Pay-API-Token` header, decodes the
//! `{ok, result, error}` envelope and hands back the typed result.
//!
//! ## Error Handling
//!
//! The envelope is decoded whatever the HTTP status is, so a `400` carrying
//! `{"ok": false, "error": {...}}` surfaces as an [`ApiError`] with the
//! remote code and name. Only bodies that are not an envelope fall back to
//! [`CryptoPayError::HttpStatus`] or [`CryptoPayError::Json`].
//!
//! [`ApiError`]: cryptopay::ApiError

use cryptopay::app::{AppInfo, AppStats, GetMeRequest, GetStatsRequest};
use cryptopay::balance::{Balance, GetBalanceRequest};
use cryptopay::check::{Check, CreateCheckRequest, DeleteCheckRequest, GetChecksRequest};
use cryptopay::currency::{CurrencyInfo, GetCurrenciesRequest};
use cryptopay::exchange::{ExchangeRate, GetExchangeRatesRequest};
use cryptopay::invoice::{CreateInvoiceRequest, DeleteInvoiceRequest, GetInvoicesRequest, Invoice};
use cryptopay::transfer::{GetTransfersRequest, Transfer, TransferRequest};
use cryptopay::{ApiMethod, ApiResponse};
use reqwest::StatusCode;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::time::Duration;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::config::ClientConfig;
use crate::constants::API_TOKEN_HEADER;
use crate::error::CryptoPayError;

/// A client for the Crypto Pay API.
///
/// Cloning is cheap: the underlying reqwest client is reference-counted.
#[derive(Clone, Debug)]
pub struct CryptoPayClient {
    /// Base URL, always ending in a single `/`
    base_url: Url,
    /// Token header value, marked sensitive
    token: HeaderValue,
    /// Shared reqwest HTTP client
    client: reqwest::Client,
    /// Per-request timeout
    timeout: Duration,
}

impl CryptoPayClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoPayError`] if the token is empty or not a valid header
    /// value, if the base URL does not parse, or if the HTTP client cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self, CryptoPayError> {
        if config.token.trim().is_empty() {
            return Err(CryptoPayError::MissingToken);
        }
        let mut token =
            HeaderValue::from_str(config.token.trim()).map_err(CryptoPayError::InvalidToken)?;
        token.set_sensitive(true);

        let base_url = normalize_base_url(config.effective_base_url())?;

        let client = match config.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .build()
                .map_err(CryptoPayError::ClientBuild)?,
        };

        Ok(Self {
            base_url,
            token,
            client,
            timeout: config.timeout,
        })
    }

    /// Creates a mainnet client with default settings.
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::new`].
    pub fn mainnet(token: impl Into<String>) -> Result<Self, CryptoPayError> {
        Self::new(ClientConfig::new(token))
    }

    /// Creates a testnet client with default settings.
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::new`].
    pub fn testnet(token: impl Into<String>) -> Result<Self, CryptoPayError> {
        Self::new(ClientConfig::new(token).with_network(crate::Network::Testnet))
    }

    /// Returns the base URL used by this client.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the URL `M` is sent to.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoPayError::UrlParse`] if the method name does not join
    /// onto the base URL.
    pub fn method_url<M: ApiMethod>(&self) -> Result<Url, CryptoPayError> {
        self.base_url
            .join(M::NAME)
            .map_err(|source| CryptoPayError::UrlParse {
                context: "Failed to construct method URL",
                source,
            })
    }

    /// Calls the remote method `M` with `request` as its query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoPayError::Envelope`] if the service answers with
    /// `ok: false`, and a transport or decoding variant otherwise.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "cryptopay.call",
            skip_all,
            fields(
                method = M::NAME,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty
            )
        )
    )]
    pub async fn call<M>(&self, request: &M) -> Result<M::Output, CryptoPayError>
    where
        M: ApiMethod + Sync,
    {
        let url = self.method_url::<M>()?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(%url, "sending request");

        let http_response = self
            .client
            .get(url)
            .header(API_TOKEN_HEADER, self.token.clone())
            .query(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| CryptoPayError::Http {
                method: M::NAME,
                source,
            })?;

        let status = http_response.status();
        let body = http_response
            .bytes()
            .await
            .map_err(|source| CryptoPayError::ResponseBodyRead {
                method: M::NAME,
                source,
            })?;

        let result = decode_response::<M::Output>(M::NAME, status, &body);

        record_result_on_span(&result);

        result
    }

    /// Returns basic information about the app (`getMe`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn get_me(&self) -> Result<AppInfo, CryptoPayError> {
        self.call(&GetMeRequest).await
    }

    /// Creates an invoice (`createInvoice`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<Invoice, CryptoPayError> {
        self.call(request).await
    }

    /// Deletes an invoice (`deleteInvoice`). Returns `true` on success.
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn delete_invoice(
        &self,
        request: impl Into<DeleteInvoiceRequest>,
    ) -> Result<bool, CryptoPayError> {
        let request: DeleteInvoiceRequest = request.into();
        self.call(&request).await
    }

    /// Lists invoices matching the filters (`getInvoices`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn get_invoices(
        &self,
        request: &GetInvoicesRequest,
    ) -> Result<Vec<Invoice>, CryptoPayError> {
        self.call(request).await.map(Into::into)
    }

    /// Creates a check (`createCheck`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn create_check(&self, request: &CreateCheckRequest) -> Result<Check, CryptoPayError> {
        self.call(request).await
    }

    /// Deletes a check (`deleteCheck`). Returns `true` on success.
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn delete_check(
        &self,
        request: impl Into<DeleteCheckRequest>,
    ) -> Result<bool, CryptoPayError> {
        let request: DeleteCheckRequest = request.into();
        self.call(&request).await
    }

    /// Lists checks matching the filters (`getChecks`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn get_checks(&self, request: &GetChecksRequest) -> Result<Vec<Check>, CryptoPayError> {
        self.call(request).await.map(Into::into)
    }

    /// Sends coins from the app balance to a Telegram user (`transfer`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn transfer(&self, request: &TransferRequest) -> Result<Transfer, CryptoPayError> {
        self.call(request).await
    }

    /// Lists transfers matching the filters (`getTransfers`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn get_transfers(
        &self,
        request: &GetTransfersRequest,
    ) -> Result<Vec<Transfer>, CryptoPayError> {
        self.call(request).await.map(Into::into)
    }

    /// Returns the app balance (`getBalance`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn get_balance(&self) -> Result<Balance, CryptoPayError> {
        self.call(&GetBalanceRequest).await
    }

    /// Returns the current exchange rates (`getExchangeRates`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn get_exchange_rates(&self) -> Result<Vec<ExchangeRate>, CryptoPayError> {
        self.call(&GetExchangeRatesRequest).await
    }

    /// Returns the supported currencies (`getCurrencies`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn get_currencies(&self) -> Result<Vec<CurrencyInfo>, CryptoPayError> {
        self.call(&GetCurrenciesRequest).await
    }

    /// Returns app statistics for a window (`getStats`).
    ///
    /// # Errors
    ///
    /// See [`CryptoPayClient::call`].
    pub async fn get_stats(&self, request: &GetStatsRequest) -> Result<AppStats, CryptoPayError> {
        self.call(request).await
    }
}

/// Builds a client from a [`ClientConfig`], see [`CryptoPayClient::new`].
impl TryFrom<ClientConfig> for CryptoPayClient {
    type Error = CryptoPayError;

    fn try_from(config: ClientConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

/// Parses `raw`, normalized to end in exactly one `/` so method names join
/// under it rather than replacing its last segment.
fn normalize_base_url(raw: &str) -> Result<Url, CryptoPayError> {
    let mut normalized = raw.trim().trim_end_matches('/').to_owned();
    normalized.push('/');
    Url::parse(&normalized).map_err(|source| CryptoPayError::UrlParse {
        context: "Failed to parse base url",
        source,
    })
}

/// Decodes a response body into the method result.
fn decode_response<T: DeserializeOwned>(
    method: &'static str,
    status: StatusCode,
    body: &[u8],
) -> Result<T, CryptoPayError> {
    match serde_json::from_slice::<ApiResponse<T>>(body) {
        Ok(envelope) => Ok(envelope.into_result(method)?),
        Err(_) if !status.is_success() => Err(CryptoPayError::HttpStatus {
            method,
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }),
        Err(source) => Err(CryptoPayError::Json { method, source }),
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::WARN, error = %err, "Crypto Pay request failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
