//! A library for reporting the SOL balance history of a Solana wallet
//!
//! This crate fetches a wallet's recent transaction signatures over JSON-RPC,
//! fetches the detail record of each transaction and compiles the wallet's
//! balance change per transaction into a `Time` / `Wallet Delta` table.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod errors;
pub mod export;
pub mod models;
pub mod report;
pub mod rpc;

pub use config::{MissingWalletPolicy, ReportConfig, ReportConfigBuilder};
pub use errors::{ReportError, ReportResult};
pub use models::{ReportRow, WalletReport};
pub use report::{export_trades, ReportBuilder, TransactionSource};
pub use rpc::RpcClient;

/// Main entry point for building a wallet report from a configuration
pub async fn build_report(wallet: &str, config: &ReportConfig) -> ReportResult<WalletReport> {
    // Initialize the RPC client
    let client = RpcClient::new(config)?;

    ReportBuilder::from_config(&client, config)
        .build(wallet, config.signature_limit)
        .await
}

/// Version of the wallet delta report
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
