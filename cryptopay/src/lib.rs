#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Crypto Pay API.
//!
//! Crypto Pay is the payment API of the Crypto Bot on Telegram: an app can
//! issue invoices, create checks, send transfers and read its balance and
//! the current exchange rates. This crate holds the wire types only; the HTTP
//! transport lives in `cryptopay-http`.
//!
//! # Overview
//!
//! Each remote method is a request type implementing [`ApiMethod`], which ties
//! together the method name, the query parameters (the request's own
//! serialization) and the type of the result. Every response is wrapped in an
//! [`ApiResponse`] envelope that is unwrapped with
//! [`ApiResponse::into_result`].
//!
//! # Modules
//!
//! - [`app`] - App identity and statistics (`getMe`, `getStats`)
//! - [`balance`] - App balance (`getBalance`)
//! - [`check`] - Checks (`createCheck`, `deleteCheck`, `getChecks`)
//! - [`currency`] - Asset and fiat codes, supported currencies (`getCurrencies`)
//! - [`envelope`] - The `{ok, result, error}` response envelope
//! - [`exchange`] - Exchange rates (`getExchangeRates`)
//! - [`invoice`] - Invoices (`createInvoice`, `deleteInvoice`, `getInvoices`)
//! - [`method`] - The [`ApiMethod`] trait and list results
//! - [`transfer`] - Transfers (`transfer`, `getTransfers`)

pub mod app;
pub mod balance;
pub mod check;
pub mod currency;
pub mod envelope;
pub mod exchange;
pub mod invoice;
pub mod method;
pub mod transfer;

pub use currency::{Asset, CurrencyType, Fiat};
pub use envelope::{ApiError, ApiResponse, EnvelopeError};
pub use method::{ApiMethod, Items};
