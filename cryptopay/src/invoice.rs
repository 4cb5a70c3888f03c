//! Invoices: priced payment requests settled through the Crypto Bot.
//!
//! - [`Invoice`] - The invoice record returned by the service
//! - [`CreateInvoiceRequest`] - `createInvoice`
//! - [`DeleteInvoiceRequest`] - `deleteInvoice`
//! - [`GetInvoicesRequest`] - `getInvoices`

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::formats::CommaSeparator;
use serde_with::{PickFirst, StringWithSeparator, serde_as};

use crate::currency::{Asset, CurrencyType, Fiat};
use crate::method::{ApiMethod, Items};

/// Lifecycle state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Waiting for payment.
    Active,
    /// Paid.
    Paid,
    /// Expired before being paid.
    Expired,
}

/// Label of the button shown to the payer once the invoice is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaidButtonName {
    /// "View Item".
    ViewItem,
    /// "View Channel".
    OpenChannel,
    /// "Open Bot".
    OpenBot,
    /// "Return".
    Callback,
}

/// An invoice created by the app.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique ID for this invoice.
    pub invoice_id: u64,

    /// Hash of the invoice.
    pub hash: String,

    /// Whether the amount is in crypto or fiat.
    #[serde(default)]
    pub currency_type: CurrencyType,

    /// Cryptocurrency of a crypto-priced invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,

    /// Fiat currency of a fiat-priced invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiat: Option<Fiat>,

    /// Amount of the invoice.
    pub amount: Decimal,

    /// Asset the fiat-priced invoice was paid in (paid invoices only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_asset: Option<Asset>,

    /// Amount paid in `paid_asset` (paid fiat invoices only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Decimal>,

    /// Rate of `paid_asset` in the invoice fiat (paid fiat invoices only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_fiat_rate: Option<Decimal>,

    /// Assets that can be used to pay a fiat-priced invoice.
    ///
    /// The service sends a JSON array; a comma-separated string is accepted too.
    #[serde_as(as = "PickFirst<(_, StringWithSeparator::<CommaSeparator, Asset>)>")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepted_assets: Vec<Asset>,

    /// Asset of the service fee (paid invoices only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_asset: Option<Asset>,

    /// Amount of the service fee (paid invoices only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_amount: Option<Decimal>,

    /// URL the payer opens to pay through the bot.
    pub bot_invoice_url: String,

    /// URL to pay in the Telegram Mini App.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mini_app_invoice_url: Option<String>,

    /// URL to pay in the web version of the Crypto Bot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_app_invoice_url: Option<String>,

    /// Description shown to the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current status.
    pub status: InvoiceStatus,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Price of the asset in USD at payment time (paid invoices only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_usd_rate: Option<Decimal>,

    /// Whether the payer may attach a comment.
    #[serde(default)]
    pub allow_comments: bool,

    /// Whether the payer may pay anonymously.
    #[serde(default)]
    pub allow_anonymous: bool,

    /// Expiration time, if one was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Payment time (paid invoices only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,

    /// Whether the invoice was paid anonymously.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_anonymously: Option<bool>,

    /// Comment left by the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Message shown to the payer after payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_message: Option<String>,

    /// App data attached at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,

    /// Label of the post-payment button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_btn_name: Option<PaidButtonName>,

    /// URL opened by the post-payment button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_btn_url: Option<String>,
}

impl Invoice {
    /// Returns `true` once the invoice has been paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Returns the URL to hand to the payer.
    #[must_use]
    pub fn pay_url(&self) -> &str {
        &self.bot_invoice_url
    }
}

/// Parameters for `createInvoice`.
///
/// # Example
///
/// ```rust
/// use cryptopay::currency::Asset;
/// use cryptopay::invoice::CreateInvoiceRequest;
/// use rust_decimal::Decimal;
///
/// let request = CreateInvoiceRequest::crypto(Asset::Usdt, Decimal::new(12550, 2))
///     .with_description("Description for the user")
///     .with_allow_comments(true)
///     .with_expires_in(300);
/// assert_eq!(request.amount.to_string(), "125.50");
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateInvoiceRequest {
    /// Price denomination; the service defaults to `crypto`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_type: Option<CurrencyType>,

    /// Asset of a crypto-priced invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,

    /// Fiat of a fiat-priced invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiat: Option<Fiat>,

    /// Assets accepted for a fiat-priced invoice; all assets when empty.
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, Asset>")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accepted_assets: Vec<Asset>,

    /// Invoice amount.
    pub amount: Decimal,

    /// Description shown to the payer (up to 1024 characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Message shown after payment (up to 2048 characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_message: Option<String>,

    /// Label of the post-payment button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_btn_name: Option<PaidButtonName>,

    /// URL opened by the post-payment button; required with `paid_btn_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_btn_url: Option<String>,

    /// Opaque app data (up to 4 KB).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,

    /// Whether the payer may attach a comment; the service defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_comments: Option<bool>,

    /// Whether the payer may pay anonymously; the service defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_anonymous: Option<bool>,

    /// Lifetime in seconds (1 to 2 678 400).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u32>,
}

impl CreateInvoiceRequest {
    /// Creates a request for an invoice priced in `asset`.
    #[must_use]
    pub const fn crypto(asset: Asset, amount: Decimal) -> Self {
        Self::blank(None, Some(asset), None, amount)
    }

    /// Creates a request for an invoice priced in `fiat`.
    #[must_use]
    pub const fn fiat(fiat: Fiat, amount: Decimal) -> Self {
        Self::blank(Some(CurrencyType::Fiat), None, Some(fiat), amount)
    }

    const fn blank(
        currency_type: Option<CurrencyType>,
        asset: Option<Asset>,
        fiat: Option<Fiat>,
        amount: Decimal,
    ) -> Self {
        Self {
            currency_type,
            asset,
            fiat,
            accepted_assets: Vec::new(),
            amount,
            description: None,
            hidden_message: None,
            paid_btn_name: None,
            paid_btn_url: None,
            payload: None,
            allow_comments: None,
            allow_anonymous: None,
            expires_in: None,
        }
    }

    /// Restricts the assets a fiat-priced invoice can be paid in.
    #[must_use]
    pub fn with_accepted_assets(mut self, assets: impl IntoIterator<Item = Asset>) -> Self {
        self.accepted_assets = assets.into_iter().collect();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the message shown after payment.
    #[must_use]
    pub fn with_hidden_message(mut self, message: impl Into<String>) -> Self {
        self.hidden_message = Some(message.into());
        self
    }

    /// Sets the post-payment button.
    #[must_use]
    pub fn with_paid_button(mut self, name: PaidButtonName, url: impl Into<String>) -> Self {
        self.paid_btn_name = Some(name);
        self.paid_btn_url = Some(url.into());
        self
    }

    /// Attaches opaque app data.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Allows or forbids payer comments.
    #[must_use]
    pub const fn with_allow_comments(mut self, allow: bool) -> Self {
        self.allow_comments = Some(allow);
        self
    }

    /// Allows or forbids anonymous payment.
    #[must_use]
    pub const fn with_allow_anonymous(mut self, allow: bool) -> Self {
        self.allow_anonymous = Some(allow);
        self
    }

    /// Sets the invoice lifetime in seconds.
    #[must_use]
    pub const fn with_expires_in(mut self, seconds: u32) -> Self {
        self.expires_in = Some(seconds);
        self
    }
}

impl ApiMethod for CreateInvoiceRequest {
    const NAME: &'static str = "createInvoice";
    type Output = Invoice;
}

/// Parameters for `deleteInvoice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteInvoiceRequest {
    /// ID of the invoice to delete.
    pub invoice_id: u64,
}

impl DeleteInvoiceRequest {
    /// Creates a request deleting `invoice_id`.
    #[must_use]
    pub const fn new(invoice_id: u64) -> Self {
        Self { invoice_id }
    }
}

impl From<u64> for DeleteInvoiceRequest {
    fn from(invoice_id: u64) -> Self {
        Self::new(invoice_id)
    }
}

impl ApiMethod for DeleteInvoiceRequest {
    const NAME: &'static str = "deleteInvoice";
    type Output = bool;
}

/// Parameters for `getInvoices`. Every filter is optional.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetInvoicesRequest {
    /// Only invoices in this asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,

    /// Only invoices in this fiat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiat: Option<Fiat>,

    /// Only these invoices.
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, u64>")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invoice_ids: Vec<u64>,

    /// Only invoices in this status (`active` or `paid`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,

    /// Number of invoices to skip; the service defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Number of invoices to return (1 to 1000); the service defaults to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl GetInvoicesRequest {
    /// Filters by asset.
    #[must_use]
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Filters by fiat.
    #[must_use]
    pub fn with_fiat(mut self, fiat: Fiat) -> Self {
        self.fiat = Some(fiat);
        self
    }

    /// Filters by invoice IDs.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.invoice_ids = ids.into_iter().collect();
        self
    }

    /// Filters by status.
    #[must_use]
    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
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

impl ApiMethod for GetInvoicesRequest {
    const NAME: &'static str = "getInvoices";
    type Output = Items<Invoice>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAID_FIAT_INVOICE: &str = r#"{
        "invoice_id": 528890,
        "hash": "IVnvY2YeKqBy",
        "currency_type": "fiat",
        "fiat": "USD",
        "amount": "10.00",
        "paid_asset": "USDT",
        "paid_amount": "10.01",
        "paid_fiat_rate": "0.999",
        "accepted_assets": ["USDT", "TON"],
        "fee_asset": "USDT",
        "fee_amount": 0.1,
        "bot_invoice_url": "https://t.me/CryptoBot?start=IVnvY2YeKqBy",
        "mini_app_invoice_url": "https://t.me/CryptoBot/app?startapp=invoice-IVnvY2YeKqBy",
        "web_app_invoice_url": "https://app.send.tg/invoices/IVnvY2YeKqBy",
        "description": "Coffee",
        "status": "paid",
        "created_at": "2024-03-01T10:00:00.000Z",
        "paid_usd_rate": "1.0",
        "allow_comments": true,
        "allow_anonymous": false,
        "paid_at": "2024-03-01T10:05:12.345Z",
        "paid_anonymously": false,
        "payload": "order-42",
        "paid_btn_name": "viewItem",
        "paid_btn_url": "https://example.com/orders/42"
    }"#;

    #[test]
    fn test_invoice_deserializes_paid_fiat_invoice() {
        let invoice: Invoice = serde_json::from_str(PAID_FIAT_INVOICE).unwrap();
        assert_eq!(invoice.invoice_id, 528_890);
        assert_eq!(invoice.currency_type, CurrencyType::Fiat);
        assert_eq!(invoice.fiat, Some(Fiat::Usd));
        assert_eq!(invoice.amount, Decimal::new(1000, 2));
        assert_eq!(invoice.accepted_assets, vec![Asset::Usdt, Asset::Ton]);
        assert_eq!(invoice.fee_amount, Some(Decimal::new(1, 1)));
        assert_eq!(invoice.paid_btn_name, Some(PaidButtonName::ViewItem));
        assert!(invoice.is_paid());
        assert!(invoice.paid_at.is_some());
        assert_eq!(invoice.pay_url(), "https://t.me/CryptoBot?start=IVnvY2YeKqBy");
    }

    #[test]
    fn test_invoice_accepts_comma_separated_assets_and_minimal_fields() {
        let json = r#"{
            "invoice_id": 1,
            "hash": "h",
            "asset": "TON",
            "amount": "2.5",
            "accepted_assets": "USDT,BTC",
            "bot_invoice_url": "https://t.me/CryptoTestnetBot?start=h",
            "status": "active",
            "created_at": "2024-03-01T10:00:00Z"
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.currency_type, CurrencyType::Crypto);
        assert_eq!(invoice.asset, Some(Asset::Ton));
        assert_eq!(invoice.accepted_assets, vec![Asset::Usdt, Asset::Btc]);
        assert!(!invoice.allow_comments);
        assert!(invoice.expiration_date.is_none());
    }

    #[test]
    fn test_create_invoice_omits_unset_optionals() {
        let request = CreateInvoiceRequest::crypto(Asset::Usdt, Decimal::new(12550, 2));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"asset": "USDT", "amount": "125.50"}));
    }

    #[test]
    fn test_create_invoice_sends_every_set_field() {
        let request = CreateInvoiceRequest::fiat(Fiat::Eur, Decimal::new(5, 0))
            .with_accepted_assets([Asset::Usdt, Asset::Ton])
            .with_description("Description for the user")
            .with_hidden_message("Thanks")
            .with_paid_button(PaidButtonName::Callback, "https://example.com/done")
            .with_payload("any payload")
            .with_allow_comments(true)
            .with_allow_anonymous(false)
            .with_expires_in(300);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "currency_type": "fiat",
                "fiat": "EUR",
                "accepted_assets": "USDT,TON",
                "amount": "5",
                "description": "Description for the user",
                "hidden_message": "Thanks",
                "paid_btn_name": "callback",
                "paid_btn_url": "https://example.com/done",
                "payload": "any payload",
                "allow_comments": true,
                "allow_anonymous": false,
                "expires_in": 300
            })
        );
    }

    #[test]
    fn test_get_invoices_default_is_empty_query() {
        let value = serde_json::to_value(GetInvoicesRequest::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_get_invoices_joins_each_id_once() {
        let request = GetInvoicesRequest::default()
            .with_ids([7, 8, 9])
            .with_status(InvoiceStatus::Paid)
            .with_page(0, 50);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"invoice_ids": "7,8,9", "status": "paid", "offset": 0, "count": 50})
        );
    }

    #[test]
    fn test_delete_invoice_always_sends_id() {
        let value = serde_json::to_value(DeleteInvoiceRequest::from(528_890)).unwrap();
        assert_eq!(value, json!({"invoice_id": 528_890}));
        assert_eq!(DeleteInvoiceRequest::NAME, "deleteInvoice");
    }
}
