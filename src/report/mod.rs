//! Wallet report assembly
//!
//! Fetches the wallet's signatures once, fetches the detail record of each
//! signature in order and turns every record into one row holding the block
//! time and the wallet's balance change.


use async_trait::async_trait;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info, warn};

use crate::config::{MissingWalletPolicy, ReportConfig};
use crate::errors::{ReportError, ReportResult};
use crate::models::{ReportRow, SignatureInfo, TransactionDetail, WalletReport};

/// Where signatures and transaction records come from
#[async_trait]
pub trait TransactionSource {
    /// Up to `limit` of the most recent signatures involving `wallet`
    async fn signatures(&self, wallet: &str, limit: usize) -> ReportResult<Vec<SignatureInfo>>;

    /// The full record of one transaction; empty when unavailable
    async fn transaction(&self, signature: &str) -> ReportResult<TransactionDetail>;
}

/// Builds wallet reports from a [`TransactionSource`]
pub struct ReportBuilder<'a, S: TransactionSource + Sync> {
    source: &'a S,
    policy: MissingWalletPolicy,
    concurrency: usize,
}

impl<'a, S: TransactionSource + Sync> ReportBuilder<'a, S> {
    /// Create a builder that fetches sequentially and fails on a missing wallet
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            policy: MissingWalletPolicy::Fail,
            concurrency: 1,
        }
    }

    /// Create a builder using the policy and concurrency of `config`
    pub fn from_config(source: &'a S, config: &ReportConfig) -> Self {
        Self::new(source)
            .missing_wallet_policy(config.missing_wallet_policy)
            .concurrency(config.concurrency)
    }

    /// Set the missing-wallet policy
    pub fn missing_wallet_policy(mut self, policy: MissingWalletPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set how many detail fetches may be in flight; rows keep signature order
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Build the report for `wallet` over its `limit` most recent transactions
    pub async fn build(&self, wallet: &str, limit: usize) -> ReportResult<WalletReport> {
        let signatures = self.source.signatures(wallet, limit).await?;
        info!("Building report for {} over {} transactions", wallet, signatures.len());

        let mut report = WalletReport::new(wallet);
        if self.concurrency == 1 {
            // Check each record as it arrives so a missing wallet aborts early
            for info in &signatures {
                let detail = self.source.transaction(&info.signature).await?;
                if let Some(row) = self.row_for(wallet, &info.signature, &detail)? {
                    report.push(row);
                }
            }
        } else {
            let details = self.fetch_concurrently(&signatures).await?;
            for (info, detail) in signatures.iter().zip(details.iter()) {
                if let Some(row) = self.row_for(wallet, &info.signature, detail)? {
                    report.push(row);
                }
            }
        }

        info!(
            "Report for {} has {} rows, net change {:.9} SOL",
            wallet,
            report.len(),
            report.net_change()
        );
        Ok(report)
    }

    /// Fetch every detail record with up to `concurrency` requests in flight,
    /// preserving signature order
    async fn fetch_concurrently(&self, signatures: &[SignatureInfo]) -> ReportResult<Vec<TransactionDetail>> {
        stream::iter(signatures.iter().map(|info| self.source.transaction(&info.signature)))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// Turn one record into a row; `None` if the record is skipped
    fn row_for(
        &self,
        wallet: &str,
        signature: &str,
        detail: &TransactionDetail,
    ) -> ReportResult<Option<ReportRow>> {
        if !detail.has_transaction() {
            debug!("Skipping {}: no transaction section", signature);
            return Ok(None);
        }

        let index = match detail.wallet_index(wallet) {
            Some(index) => index,
            None => match self.policy {
                MissingWalletPolicy::Fail => {
                    return Err(ReportError::WalletNotFound {
                        wallet: wallet.to_string(),
                        signature: signature.to_string(),
                    });
                }
                MissingWalletPolicy::Skip => {
                    warn!("Skipping {}: wallet {} not in account keys", signature, wallet);
                    return Ok(None);
                }
            },
        };

        let delta = detail.balance_delta(index).ok_or_else(|| ReportError::MalformedTransaction {
            signature: signature.to_string(),
            reason: format!("no pre/post balance at account index {}", index),
        })?;

        Ok(Some(ReportRow::new(detail.block_time, delta)))
    }
}

/// Build the report for `wallet` over its `limit` most recent transactions,
/// sequentially and failing if a transaction does not list the wallet
pub async fn export_trades<S: TransactionSource + Sync>(
    source: &S,
    wallet: &str,
    limit: usize,
) -> ReportResult<WalletReport> {
    ReportBuilder::new(source).build(wallet, limit).await
}
