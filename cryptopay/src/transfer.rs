//! Transfers: sending coins from the app balance to a Telegram user.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::formats::CommaSeparator;
use serde_with::{DisplayFromStr, PickFirst, StringWithSeparator, serde_as};

use crate::currency::Asset;
use crate::method::{ApiMethod, Items};

/// State of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// The coins were delivered.
    Completed,
}

/// A completed transfer.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique ID for this transfer.
    pub transfer_id: u64,

    /// Idempotency key supplied when the transfer was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spend_id: Option<String>,

    /// Telegram user ID the coins were sent to (number or numeric string).
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub user_id: u64,

    /// Asset of the transfer.
    pub asset: Asset,

    /// Amount of the transfer.
    pub amount: Decimal,

    /// Current status.
    pub status: TransferStatus,

    /// Completion time.
    pub completed_at: DateTime<Utc>,

    /// Comment attached to the transfer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Parameters for `transfer`.
///
/// `spend_id` makes the call idempotent: the service performs at most one
/// transfer per `spend_id`, so retrying with the same value is safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    /// Recipient Telegram user ID. The user must have started the bot.
    pub user_id: u64,

    /// Asset to send.
    pub asset: Asset,

    /// Amount to send.
    pub amount: Decimal,

    /// Unique idempotency key (up to 64 characters).
    pub spend_id: String,

    /// Comment shown to the recipient (up to 1024 characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Suppresses the recipient notification when `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_send_notification: Option<bool>,
}

impl TransferRequest {
    /// Creates a transfer request with the required fields.
    #[must_use]
    pub fn new(user_id: u64, asset: Asset, amount: Decimal, spend_id: impl Into<String>) -> Self {
        Self {
            user_id,
            asset,
            amount,
            spend_id: spend_id.into(),
            comment: None,
            disable_send_notification: None,
        }
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Enables or disables the recipient notification.
    #[must_use]
    pub const fn with_notification(mut self, notify: bool) -> Self {
        self.disable_send_notification = Some(!notify);
        self
    }
}

impl ApiMethod for TransferRequest {
    const NAME: &'static str = "transfer";
    type Output = Transfer;
}

/// Parameters for `getTransfers`. Every filter is optional.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetTransfersRequest {
    /// Only transfers in this asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,

    /// Only these transfers.
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, u64>")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transfer_ids: Vec<u64>,

    /// Only the transfer made with this idempotency key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spend_id: Option<String>,

    /// Number of transfers to skip; the service defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Number of transfers to return (1 to 1000); the service defaults to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl GetTransfersRequest {
    /// Filters by asset.
    #[must_use]
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Filters by transfer IDs.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.transfer_ids = ids.into_iter().collect();
        self
    }

    /// Filters by idempotency key.
    #[must_use]
    pub fn with_spend_id(mut self, spend_id: impl Into<String>) -> Self {
        self.spend_id = Some(spend_id.into());
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

impl ApiMethod for GetTransfersRequest {
    const NAME: &'static str = "getTransfers";
    type Output = Items<Transfer>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transfer_accepts_numeric_user_id() {
        let json = r#"{
            "transfer_id": 77,
            "spend_id": "payout-1",
            "user_id": 1234567,
            "asset": "USDT",
            "amount": "3.25",
            "status": "completed",
            "completed_at": "2024-06-10T12:00:00.000Z"
        }"#;
        let transfer: Transfer = serde_json::from_str(json).unwrap();
        assert_eq!(transfer.user_id, 1_234_567);
        assert_eq!(transfer.spend_id.as_deref(), Some("payout-1"));
        assert_eq!(transfer.status, TransferStatus::Completed);
        assert!(transfer.comment.is_none());
    }

    #[test]
    fn test_transfer_accepts_string_user_id() {
        let json = r#"{
            "transfer_id": 78,
            "user_id": "1234567",
            "asset": "TON",
            "amount": "1",
            "status": "completed",
            "completed_at": "2024-06-10T12:00:00Z",
            "comment": "thanks"
        }"#;
        let transfer: Transfer = serde_json::from_str(json).unwrap();
        assert_eq!(transfer.user_id, 1_234_567);
        assert_eq!(transfer.comment.as_deref(), Some("thanks"));
    }

    #[test]
    fn test_transfer_request_required_fields() {
        let request = TransferRequest::new(1_234_567, Asset::Usdt, Decimal::new(325, 2), "payout-1");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "user_id": 1_234_567,
                "asset": "USDT",
                "amount": "3.25",
                "spend_id": "payout-1"
            })
        );
    }

    #[test]
    fn test_transfer_request_optionals() {
        let request = TransferRequest::new(1, Asset::Ton, Decimal::ONE, "s")
            .with_comment("gift")
            .with_notification(false);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["comment"], "gift");
        assert_eq!(value["disable_send_notification"], true);
    }

    #[test]
    fn test_get_transfers_by_spend_id() {
        let request = GetTransfersRequest::default().with_spend_id("payout-1");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"spend_id": "payout-1"}));
    }
}
