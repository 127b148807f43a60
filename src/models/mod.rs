//! Data models for RPC responses and the wallet report

pub mod signature;
pub mod transaction;
pub mod report;

pub use self::signature::SignatureInfo;
pub use self::transaction::{TransactionDetail, TransactionMeta, TransactionSection, Message, LoadedAddresses};
pub use self::report::{ReportRow, RowRecord, WalletReport};
