//! Swap classification
//!
//! Meant to tell Raydium swaps apart from other activity (bot trades in
//! particular). Which instructions count as a swap is not settled, so the
//! classifier only reports that it is unsupported and the report builder
//! does not call it.

use crate::errors::{ReportError, ReportResult};
use crate::models::TransactionDetail;

/// Whether `transaction` is a Raydium swap
pub fn is_raydium_swap(transaction: &TransactionDetail) -> ReportResult<bool> {
    Err(ReportError::Unsupported(format!(
        "swap classification is not implemented (transaction {})",
        transaction.signature().unwrap_or("<unknown>")
    )))
}
