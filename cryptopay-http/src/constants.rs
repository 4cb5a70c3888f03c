//! HTTP-specific constants for the Crypto Pay API.

use std::time::Duration;

/// Header carrying the app's API token on every request.
pub const API_TOKEN_HEADER: &str = "Crypto-Pay-API-Token";

/// Base URL of the production API (`@CryptoBot`).
pub const MAINNET_API_URL: &str = "https://pay.crypt.bot/api/";

/// Base URL of the test network API (`@CryptoTestnetBot`).
pub const TESTNET_API_URL: &str = "https://testnet-pay.crypt.bot/api/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
