#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport for the Crypto Pay API.
//!
//! Wraps the wire types of the `cryptopay` crate in an async `reqwest`
//! client. Enable the `telemetry` feature to get a `tracing` span per call.
//!
//! # Example
//!
//! ```rust,no_run
//! use cryptopay::invoice::CreateInvoiceRequest;
//! use cryptopay::Asset;
//! use cryptopay_http::CryptoPayClient;
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> Result<(), cryptopay_http::CryptoPayError> {
//! let client = CryptoPayClient::testnet("1234:AAAA")?;
//! let invoice = client
//!     .create_invoice(&CreateInvoiceRequest::crypto(Asset::Ton, Decimal::new(15, 1)))
//!     .await?;
//! println!("pay at {}", invoice.pay_url());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - The [`CryptoPayClient`] and its per-method calls
//! - [`config`] - [`ClientConfig`] and [`Network`]
//! - [`constants`] - Header name, base URLs, default timeout
//! - [`error`] - [`CryptoPayError`]

pub mod client;
pub mod config;
pub mod constants;
pub mod error;

pub use client::CryptoPayClient;
pub use config::{ClientConfig, Network};
pub use error::CryptoPayError;
