//! Wallet report table

use serde::{Serialize, Deserialize};
use crate::constants::{LAMPORTS_PER_SOL, REPORT_COLUMNS};

/// One row of the report: when the transaction happened and how much the
/// wallet's balance changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Block time, epoch seconds
    pub time: Option<i64>,
    /// Balance change in lamports
    pub delta_lamports: i64,
}

/// A row as it appears in exported output, with the delta in SOL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    #[serde(rename = "Time")]
    pub time: Option<i64>,
    #[serde(rename = "Wallet Delta")]
    pub wallet_delta: f64,
}

impl ReportRow {
    /// Create a new row
    pub fn new(time: Option<i64>, delta_lamports: i64) -> Self {
        Self { time, delta_lamports }
    }

    /// Balance change in SOL
    pub fn wallet_delta(&self) -> f64 {
        lamports_to_sol(self.delta_lamports)
    }

    /// Exported form of the row
    pub fn record(&self) -> RowRecord {
        RowRecord {
            time: self.time,
            wallet_delta: self.wallet_delta(),
        }
    }
}

/// Balance changes of one wallet, in the order the signatures were returned
/// (most recent first)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletReport {
    /// Wallet the report was built for
    pub wallet: String,
    /// Report rows
    pub rows: Vec<ReportRow>,
}

impl WalletReport {
    /// Create an empty report
    pub fn new(wallet: impl Into<String>) -> Self {
        Self {
            wallet: wallet.into(),
            rows: Vec::new(),
        }
    }

    /// Column labels
    pub fn columns(&self) -> [&'static str; 2] {
        REPORT_COLUMNS
    }

    /// Append a row
    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `Time` column
    pub fn times(&self) -> Vec<Option<i64>> {
        self.rows.iter().map(|row| row.time).collect()
    }

    /// The `Wallet Delta` column, in SOL
    pub fn wallet_deltas(&self) -> Vec<f64> {
        self.rows.iter().map(ReportRow::wallet_delta).collect()
    }

    /// Rows in exported form
    pub fn records(&self) -> Vec<RowRecord> {
        self.rows.iter().map(ReportRow::record).collect()
    }

    /// Sum of all deltas, in SOL
    pub fn net_change(&self) -> f64 {
        lamports_to_sol(self.rows.iter().map(|row| row.delta_lamports).sum())
    }
}

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: i64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}
