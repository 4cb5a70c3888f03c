//! Command-line client for the Crypto Pay API.
//!
//! # Usage
//!
//! ```bash
//! # Show the app owning the token
//! CRYPTO_PAY_TOKEN=1234:AAAA cryptopay --testnet me
//!
//! # Create a fiat invoice payable in USDT or TON
//! cryptopay create-invoice --fiat EUR --amount 12.50 --accepted-assets USDT,TON
//!
//! # Configure logging level
//! RUST_LOG=debug cryptopay balance
//! ```
//!
//! # Environment Variables
//!
//! - `CRYPTOPAY_CONFIG` - Path to TOML configuration file (default: `cryptopay.toml`)
//! - `CRYPTO_PAY_TOKEN` - App API token
//! - `CRYPTO_PAY_NETWORK` - `mainnet` or `testnet`
//! - `CRYPTO_PAY_BASE_URL` - Base URL override
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

mod cli;
mod config;
mod error;

use clap::Parser;
use cryptopay_http::CryptoPayClient;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::CliConfig;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("cryptopay failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::load_from(&cli.global.config)?.with_overrides(&cli.global);
    tracing::debug!(
        network = %config.network,
        base_url = ?config.base_url,
        "Loaded configuration"
    );

    let client = CryptoPayClient::new(config.client_config()?)?;
    dispatch(&client, cli.command).await
}

async fn dispatch(client: &CryptoPayClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Me => print_json(&client.get_me().await?),
        Command::Balance => print_json(&client.get_balance().await?),
        Command::Rates => print_json(&client.get_exchange_rates().await?),
        Command::Currencies => print_json(&client.get_currencies().await?),
        Command::Stats(args) => print_json(&client.get_stats(&args.into()).await?),
        Command::CreateInvoice(args) => {
            let invoice = client.create_invoice(&args.into()).await?;
            tracing::info!(invoice_id = invoice.invoice_id, url = invoice.pay_url(), "Invoice created");
            print_json(&invoice)
        }
        Command::DeleteInvoice { invoice_id } => print_json(&client.delete_invoice(invoice_id).await?),
        Command::Invoices(args) => print_json(&client.get_invoices(&args.into()).await?),
        Command::CreateCheck(args) => print_json(&client.create_check(&args.into()).await?),
        Command::DeleteCheck { check_id } => print_json(&client.delete_check(check_id).await?),
        Command::Checks(args) => print_json(&client.get_checks(&args.into()).await?),
        Command::Transfer(args) => {
            let transfer = client.transfer(&args.into()).await?;
            tracing::info!(transfer_id = transfer.transfer_id, "Transfer completed");
            print_json(&transfer)
        }
        Command::Transfers(args) => print_json(&client.get_transfers(&args.into()).await?),
    }
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
