//! Signature records returned by `getSignaturesForAddress`

use serde::{Serialize, Deserialize};
use serde_json::Value;

/// One entry of a wallet's signature history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    /// Transaction signature, base58
    pub signature: String,
    /// Slot the transaction landed in
    #[serde(default)]
    pub slot: Option<u64>,
    /// Estimated production time, epoch seconds
    #[serde(default)]
    pub block_time: Option<i64>,
    /// Error if the transaction failed
    #[serde(default)]
    pub err: Option<Value>,
    /// Memo attached to the transaction
    #[serde(default)]
    pub memo: Option<String>,
    /// Cluster confirmation status
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

impl SignatureInfo {
    /// Create a record carrying only a signature
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            slot: None,
            block_time: None,
            err: None,
            memo: None,
            confirmation_status: None,
        }
    }
}
