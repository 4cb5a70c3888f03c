//! Checks: pre-funded vouchers any (or one pinned) Telegram user can activate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::formats::CommaSeparator;
use serde_with::{StringWithSeparator, serde_as};

use crate::currency::Asset;
use crate::method::{ApiMethod, Items};

/// Lifecycle state of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Not yet activated.
    Active,
    /// Activated by a user.
    Activated,
}

/// A check created by the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Unique ID for this check.
    pub check_id: u64,

    /// Hash of the check.
    pub hash: String,

    /// Asset of the check.
    pub asset: Asset,

    /// Amount of the check.
    pub amount: Decimal,

    /// URL the recipient opens to activate the check.
    pub bot_check_url: String,

    /// Current status.
    pub status: CheckStatus,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Activation time (activated checks only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<DateTime<Utc>>,
}

/// Parameters for `createCheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCheckRequest {
    /// Asset of the check.
    pub asset: Asset,

    /// Amount of the check.
    pub amount: Decimal,

    /// Only this Telegram user may activate the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_to_user_id: Option<u64>,

    /// Only the user with this username may activate the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_to_username: Option<String>,
}

impl CreateCheckRequest {
    /// Creates a request for an unpinned check.
    #[must_use]
    pub const fn new(asset: Asset, amount: Decimal) -> Self {
        Self {
            asset,
            amount,
            pin_to_user_id: None,
            pin_to_username: None,
        }
    }

    /// Pins the check to a Telegram user ID.
    #[must_use]
    pub const fn pin_to_user_id(mut self, user_id: u64) -> Self {
        self.pin_to_user_id = Some(user_id);
        self
    }

    /// Pins the check to a Telegram username.
    #[must_use]
    pub fn pin_to_username(mut self, username: impl Into<String>) -> Self {
        self.pin_to_username = Some(username.into());
        self
    }
}

impl ApiMethod for CreateCheckRequest {
    const NAME: &'static str = "createCheck";
    type Output = Check;
}

/// Parameters for `deleteCheck`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteCheckRequest {
    /// ID of the check to delete.
    pub check_id: u64,
}

impl DeleteCheckRequest {
    /// Creates a request deleting `check_id`.
    #[must_use]
    pub const fn new(check_id: u64) -> Self {
        Self { check_id }
    }
}

impl From<u64> for DeleteCheckRequest {
    fn from(check_id: u64) -> Self {
        Self::new(check_id)
    }
}

impl ApiMethod for DeleteCheckRequest {
    const NAME: &'static str = "deleteCheck";
    type Output = bool;
}

/// Parameters for `getChecks`. Every filter is optional.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetChecksRequest {
    /// Only checks in this asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,

    /// Only these checks.
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, u64>")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub check_ids: Vec<u64>,

    /// Only checks in this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckStatus>,

    /// Number of checks to skip; the service defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Number of checks to return (1 to 1000); the service defaults to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl GetChecksRequest {
    /// Filters by asset.
    #[must_use]
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Filters by check IDs.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.check_ids = ids.into_iter().collect();
        self
    }

    /// Filters by status.
    #[must_use]
    pub fn with_status(mut self, status: CheckStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the page window.
    #[must_use]
    pub fn with_page(mut self, offset: u32, count: u32) -> Self {
        self.offset = Some(offset);
        self.count = Some(count);
        self
    }
}

impl ApiMethod for GetChecksRequest {
    const NAME: &'static str = "getChecks";
    type Output = Items<Check>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_deserializes() {
        let json = r#"{
            "check_id": 31,
            "hash": "CQEz9pVEzTBl",
            "asset": "TON",
            "amount": "1.5",
            "bot_check_url": "https://t.me/CryptoBot?start=CQEz9pVEzTBl",
            "status": "activated",
            "created_at": "2024-05-02T08:00:00.000Z",
            "activated_at": "2024-05-02T08:30:00.000Z"
        }"#;
        let check: Check = serde_json::from_str(json).unwrap();
        assert_eq!(check.check_id, 31);
        assert_eq!(check.asset, Asset::Ton);
        assert_eq!(check.amount, Decimal::new(15, 1));
        assert_eq!(check.status, CheckStatus::Activated);
        assert!(check.activated_at.is_some());
    }

    #[test]
    fn test_create_check_required_fields_only() {
        let request = CreateCheckRequest::new(Asset::Usdt, Decimal::new(12550, 2));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"asset": "USDT", "amount": "125.50"}));
    }

    #[test]
    fn test_create_check_pinned() {
        let request = CreateCheckRequest::new(Asset::Btc, Decimal::new(1, 4))
            .pin_to_user_id(1_234_567)
            .pin_to_username("alice");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "asset": "BTC",
                "amount": "0.0001",
                "pin_to_user_id": 1_234_567,
                "pin_to_username": "alice"
            })
        );
    }

    #[test]
    fn test_get_checks_filters() {
        let request = GetChecksRequest::default()
            .with_asset(Asset::Ton)
            .with_ids([3, 1, 2])
            .with_status(CheckStatus::Active);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"asset": "TON", "check_ids": "3,1,2", "status": "active"})
        );
    }

    #[test]
    fn test_get_checks_single_id_is_not_repeated() {
        let request = GetChecksRequest::default().with_ids([42]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"check_ids": "42"}));
    }

    #[test]
    fn test_delete_check_sends_id() {
        let value = serde_json::to_value(DeleteCheckRequest::new(9)).unwrap();
        assert_eq!(value, json!({"check_id": 9}));
    }
}
