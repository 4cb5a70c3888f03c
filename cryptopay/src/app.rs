//! App-level information: identity (`getMe`) and statistics (`getStats`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::method::ApiMethod;

/// Basic information about the app owning the API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Unique app ID.
    pub app_id: u64,

    /// App name.
    pub name: String,

    /// Username of the bot processing payments (`CryptoBot` or `CryptoTestnetBot`).
    pub payment_processing_bot_username: String,
}

/// Parameters for `getMe`. The method takes none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GetMeRequest;

impl ApiMethod for GetMeRequest {
    const NAME: &'static str = "getMe";
    type Output = AppInfo;
}

/// App statistics over a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStats {
    /// Total volume of paid invoices in USD.
    pub volume: Decimal,

    /// Share of created invoices that were paid.
    pub conversion: Decimal,

    /// Number of distinct users who paid.
    pub unique_users_count: u64,

    /// Number of invoices created.
    pub created_invoice_count: u64,

    /// Number of invoices paid.
    pub paid_invoice_count: u64,

    /// Start of the window.
    pub start_at: DateTime<Utc>,

    /// End of the window.
    pub end_at: DateTime<Utc>,
}

/// Parameters for `getStats`.
///
/// The service defaults the window to the last 24 hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GetStatsRequest {
    /// Start of the window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,

    /// End of the window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
}

impl GetStatsRequest {
    /// Creates a request for the window `[start_at, end_at]`.
    #[must_use]
    pub const fn between(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            start_at: Some(start_at),
            end_at: Some(end_at),
        }
    }
}

impl ApiMethod for GetStatsRequest {
    const NAME: &'static str = "getStats";
    type Output = AppStats;
}
