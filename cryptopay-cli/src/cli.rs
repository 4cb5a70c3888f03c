//! Command-line arguments.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use cryptopay::app::GetStatsRequest;
use cryptopay::check::{CheckStatus, CreateCheckRequest, GetChecksRequest};
use cryptopay::invoice::{CreateInvoiceRequest, GetInvoicesRequest, InvoiceStatus, PaidButtonName};
use cryptopay::transfer::{GetTransfersRequest, TransferRequest};
use cryptopay::{Asset, Fiat};
use cryptopay_http::Network;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use url::Url;

/// Command-line client for the Crypto Pay API.
#[derive(Debug, Parser)]
#[command(name = "cryptopay", version, about)]
pub struct Cli {
    /// Connection settings shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The API method to call.
    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings. Flags win over environment variables, which win
/// over the config file.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Path to the TOML config file.
    #[arg(long, global = true, env = "CRYPTOPAY_CONFIG", default_value = "cryptopay.toml")]
    pub config: PathBuf,

    /// App API token.
    #[arg(long, global = true, env = "CRYPTO_PAY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Network to call (`mainnet` or `testnet`).
    #[arg(long, global = true, env = "CRYPTO_PAY_NETWORK")]
    pub network: Option<Network>,

    /// Shorthand for `--network testnet`; wins over `--network`.
    #[arg(long, global = true)]
    pub testnet: bool,

    /// Base URL override (e.g., a local mock).
    #[arg(long, global = true, env = "CRYPTO_PAY_BASE_URL")]
    pub base_url: Option<Url>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl GlobalArgs {
    /// Returns the network selected on the command line, if any.
    #[must_use]
    pub const fn network(&self) -> Option<Network> {
        if self.testnet {
            Some(Network::Testnet)
        } else {
            self.network
        }
    }
}

/// One subcommand per API method.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the app owning the token (`getMe`).
    Me,
    /// Show the app balance (`getBalance`).
    Balance,
    /// Show current exchange rates (`getExchangeRates`).
    Rates,
    /// List supported currencies (`getCurrencies`).
    Currencies,
    /// Show app statistics (`getStats`).
    Stats(StatsArgs),
    /// Create an invoice (`createInvoice`).
    CreateInvoice(CreateInvoiceArgs),
    /// Delete an invoice (`deleteInvoice`).
    DeleteInvoice {
        /// ID of the invoice to delete.
        invoice_id: u64,
    },
    /// List invoices (`getInvoices`).
    Invoices(InvoicesArgs),
    /// Create a check (`createCheck`).
    CreateCheck(CreateCheckArgs),
    /// Delete a check (`deleteCheck`).
    DeleteCheck {
        /// ID of the check to delete.
        check_id: u64,
    },
    /// List checks (`getChecks`).
    Checks(ChecksArgs),
    /// Send coins to a Telegram user (`transfer`).
    Transfer(TransferArgs),
    /// List transfers (`getTransfers`).
    Transfers(TransfersArgs),
}

/// Arguments of `stats`.
#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    /// Window start (RFC 3339).
    #[arg(long)]
    pub start_at: Option<DateTime<Utc>>,
    /// Window end (RFC 3339).
    #[arg(long)]
    pub end_at: Option<DateTime<Utc>>,
}

impl From<StatsArgs> for GetStatsRequest {
    fn from(args: StatsArgs) -> Self {
        Self {
            start_at: args.start_at,
            end_at: args.end_at,
        }
    }
}

/// Arguments of `create-invoice`.
#[derive(Debug, Clone, Args)]
pub struct CreateInvoiceArgs {
    /// Price the invoice in this cryptocurrency.
    #[arg(long, conflicts_with = "fiat", required_unless_present = "fiat")]
    pub asset: Option<Asset>,
    /// Price the invoice in this fiat currency.
    #[arg(long)]
    pub fiat: Option<Fiat>,
    /// Invoice amount.
    #[arg(long)]
    pub amount: Decimal,
    /// Assets accepted for a fiat invoice, comma-separated.
    #[arg(long, value_delimiter = ',', requires = "fiat")]
    pub accepted_assets: Vec<Asset>,
    /// Description shown to the payer.
    #[arg(long)]
    pub description: Option<String>,
    /// Message shown after payment.
    #[arg(long)]
    pub hidden_message: Option<String>,
    /// Post-payment button (`viewItem`, `openChannel`, `openBot`, `callback`).
    #[arg(long, value_parser = parse_wire::<PaidButtonName>, requires = "paid_btn_url")]
    pub paid_btn_name: Option<PaidButtonName>,
    /// URL opened by the post-payment button.
    #[arg(long, requires = "paid_btn_name")]
    pub paid_btn_url: Option<String>,
    /// Opaque app data attached to the invoice.
    #[arg(long)]
    pub payload: Option<String>,
    /// Whether the payer may attach a comment.
    #[arg(long)]
    pub allow_comments: Option<bool>,
    /// Whether the payer may pay anonymously.
    #[arg(long)]
    pub allow_anonymous: Option<bool>,
    /// Lifetime in seconds.
    #[arg(long)]
    pub expires_in: Option<u32>,
}

impl From<CreateInvoiceArgs> for CreateInvoiceRequest {
    fn from(args: CreateInvoiceArgs) -> Self {
        let mut request = match args.fiat {
            Some(fiat) => Self::fiat(fiat, args.amount).with_accepted_assets(args.accepted_assets),
            // clap requires `--asset` whenever `--fiat` is absent
            None => Self {
                asset: args.asset,
                ..Self::crypto(Asset::Usdt, args.amount)
            },
        };
        request.description = args.description;
        request.hidden_message = args.hidden_message;
        request.paid_btn_name = args.paid_btn_name;
        request.paid_btn_url = args.paid_btn_url;
        request.payload = args.payload;
        request.allow_comments = args.allow_comments;
        request.allow_anonymous = args.allow_anonymous;
        request.expires_in = args.expires_in;
        request
    }
}

/// Arguments of `invoices`.
#[derive(Debug, Clone, Args)]
pub struct InvoicesArgs {
    /// Only invoices in this asset.
    #[arg(long)]
    pub asset: Option<Asset>,
    /// Only invoices in this fiat.
    #[arg(long)]
    pub fiat: Option<Fiat>,
    /// Only these invoice IDs, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<u64>,
    /// Only invoices in this status (`active` or `paid`).
    #[arg(long, value_parser = parse_wire::<InvoiceStatus>)]
    pub status: Option<InvoiceStatus>,
    /// Paging.
    #[command(flatten)]
    pub page: PageArgs,
}

impl From<InvoicesArgs> for GetInvoicesRequest {
    fn from(args: InvoicesArgs) -> Self {
        Self {
            asset: args.asset,
            fiat: args.fiat,
            invoice_ids: args.ids,
            status: args.status,
            offset: args.page.offset,
            count: args.page.count,
        }
    }
}

/// Arguments of `create-check`.
#[derive(Debug, Clone, Args)]
pub struct CreateCheckArgs {
    /// Asset of the check.
    #[arg(long)]
    pub asset: Asset,
    /// Amount of the check.
    #[arg(long)]
    pub amount: Decimal,
    /// Only this Telegram user may activate the check.
    #[arg(long, conflicts_with = "pin_to_username")]
    pub pin_to_user_id: Option<u64>,
    /// Only this Telegram username may activate the check.
    #[arg(long)]
    pub pin_to_username: Option<String>,
}

impl From<CreateCheckArgs> for CreateCheckRequest {
    fn from(args: CreateCheckArgs) -> Self {
        let mut request = Self::new(args.asset, args.amount);
        request.pin_to_user_id = args.pin_to_user_id;
        request.pin_to_username = args.pin_to_username;
        request
    }
}

/// Arguments of `checks`.
#[derive(Debug, Clone, Args)]
pub struct ChecksArgs {
    /// Only checks in this asset.
    #[arg(long)]
    pub asset: Option<Asset>,
    /// Only these check IDs, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<u64>,
    /// Only checks in this status (`active` or `activated`).
    #[arg(long, value_parser = parse_wire::<CheckStatus>)]
    pub status: Option<CheckStatus>,
    /// Paging.
    #[command(flatten)]
    pub page: PageArgs,
}

impl From<ChecksArgs> for GetChecksRequest {
    fn from(args: ChecksArgs) -> Self {
        Self {
            asset: args.asset,
            check_ids: args.ids,
            status: args.status,
            offset: args.page.offset,
            count: args.page.count,
        }
    }
}

/// Arguments of `transfer`.
#[derive(Debug, Clone, Args)]
pub struct TransferArgs {
    /// Recipient Telegram user ID.
    #[arg(long)]
    pub user_id: u64,
    /// Asset to send.
    #[arg(long)]
    pub asset: Asset,
    /// Amount to send.
    #[arg(long)]
    pub amount: Decimal,
    /// Idempotency key; reusing it never sends twice.
    #[arg(long)]
    pub spend_id: String,
    /// Comment shown to the recipient.
    #[arg(long)]
    pub comment: Option<String>,
    /// Do not notify the recipient.
    #[arg(long)]
    pub silent: bool,
}

impl From<TransferArgs> for TransferRequest {
    fn from(args: TransferArgs) -> Self {
        let mut request = Self::new(args.user_id, args.asset, args.amount, args.spend_id);
        request.comment = args.comment;
        if args.silent {
            request = request.with_notification(false);
        }
        request
    }
}

/// Arguments of `transfers`.
#[derive(Debug, Clone, Args)]
pub struct TransfersArgs {
    /// Only transfers in this asset.
    #[arg(long)]
    pub asset: Option<Asset>,
    /// Only these transfer IDs, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<u64>,
    /// Only the transfer made with this idempotency key.
    #[arg(long)]
    pub spend_id: Option<String>,
    /// Paging.
    #[command(flatten)]
    pub page: PageArgs,
}

impl From<TransfersArgs> for GetTransfersRequest {
    fn from(args: TransfersArgs) -> Self {
        Self {
            asset: args.asset,
            transfer_ids: args.ids,
            spend_id: args.spend_id,
            offset: args.page.offset,
            count: args.page.count,
        }
    }
}

/// Offset and count of list commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Number of records to skip.
    #[arg(long)]
    pub offset: Option<u32>,
    /// Number of records to return (1 to 1000).
    #[arg(long)]
    pub count: Option<u32>,
}

/// Parses a value by its JSON string form, e.g. `paid` or `viewItem`.
fn parse_wire<T: DeserializeOwned>(s: &str) -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::Value::String(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use cryptopay::currency::CurrencyType;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cryptopay").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_testnet_flag_selects_network() {
        let cli = parse(&["--testnet", "me"]);
        assert_eq!(cli.global.network(), Some(Network::Testnet));

        let cli = parse(&["balance", "--network", "mainnet"]);
        assert_eq!(cli.global.network(), Some(Network::Mainnet));
    }

    #[test]
    fn test_create_invoice_crypto() {
        let cli = parse(&[
            "create-invoice",
            "--asset",
            "ton",
            "--amount",
            "1.5",
            "--description",
            "Coffee",
        ]);
        let Command::CreateInvoice(args) = cli.command else {
            panic!("expected create-invoice");
        };
        let request = CreateInvoiceRequest::from(args);
        assert_eq!(request.asset, Some(Asset::Ton));
        assert_eq!(request.fiat, None);
        assert_eq!(request.currency_type, None);
        assert_eq!(request.amount, Decimal::new(15, 1));
        assert_eq!(request.description.as_deref(), Some("Coffee"));
    }

    #[test]
    fn test_create_invoice_fiat_with_accepted_assets() {
        let cli = parse(&[
            "create-invoice",
            "--fiat",
            "EUR",
            "--amount",
            "10",
            "--accepted-assets",
            "USDT,TON",
            "--paid-btn-name",
            "viewItem",
            "--paid-btn-url",
            "https://example.com/item",
        ]);
        let Command::CreateInvoice(args) = cli.command else {
            panic!("expected create-invoice");
        };
        let request = CreateInvoiceRequest::from(args);
        assert_eq!(request.currency_type, Some(CurrencyType::Fiat));
        assert_eq!(request.fiat, Some(Fiat::Eur));
        assert_eq!(request.accepted_assets, vec![Asset::Usdt, Asset::Ton]);
        assert_eq!(request.paid_btn_name, Some(PaidButtonName::ViewItem));
    }

    #[test]
    fn test_create_invoice_requires_a_currency() {
        let result = Cli::try_parse_from(["cryptopay", "create-invoice", "--amount", "1"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "cryptopay",
            "create-invoice",
            "--asset",
            "TON",
            "--fiat",
            "USD",
            "--amount",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invoices_filters() {
        let cli = parse(&["invoices", "--ids", "3,4", "--status", "paid", "--count", "20"]);
        let Command::Invoices(args) = cli.command else {
            panic!("expected invoices");
        };
        let request = GetInvoicesRequest::from(args);
        assert_eq!(request.invoice_ids, vec![3, 4]);
        assert_eq!(request.status, Some(InvoiceStatus::Paid));
        assert_eq!(request.offset, None);
        assert_eq!(request.count, Some(20));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = Cli::try_parse_from(["cryptopay", "checks", "--status", "lost"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_transfer_silent() {
        let cli = parse(&[
            "transfer",
            "--user-id",
            "1001",
            "--asset",
            "USDT",
            "--amount",
            "2",
            "--spend-id",
            "order-1",
            "--silent",
        ]);
        let Command::Transfer(args) = cli.command else {
            panic!("expected transfer");
        };
        let request = TransferRequest::from(args);
        assert_eq!(request.user_id, 1001);
        assert_eq!(request.spend_id, "order-1");
        assert_eq!(request.disable_send_notification, Some(true));
    }

    #[test]
    fn test_create_check_pins_are_exclusive() {
        let result = Cli::try_parse_from([
            "cryptopay",
            "create-check",
            "--asset",
            "TON",
            "--amount",
            "1",
            "--pin-to-user-id",
            "5",
            "--pin-to-username",
            "alice",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stats_window() {
        let cli = parse(&["stats", "--start-at", "2024-01-01T00:00:00Z"]);
        let Command::Stats(args) = cli.command else {
            panic!("expected stats");
        };
        let request = GetStatsRequest::from(args);
        assert!(request.start_at.is_some());
        assert_eq!(request.end_at, None);
    }
}
