//! Transaction detail records returned by `getTransaction` (`json` encoding)

use serde::{Serialize, Deserialize};

/// Full transaction record.
///
/// A default value stands for "no data": the fetcher returns it when the RPC
/// call fails or the node does not know the signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    /// Slot the transaction was processed in
    #[serde(default)]
    pub slot: Option<u64>,
    /// Confirmation time, epoch seconds
    #[serde(default)]
    pub block_time: Option<i64>,
    /// Transaction section (signatures and message)
    #[serde(default)]
    pub transaction: Option<TransactionSection>,
    /// Status metadata with balances
    #[serde(default)]
    pub meta: Option<TransactionMeta>,
}

/// The `transaction` section of a detail record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionSection {
    /// Signatures over the message
    #[serde(default)]
    pub signatures: Vec<String>,
    /// The signed message
    pub message: Message,
}

/// Transaction message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Static account keys, in the order balances are reported
    pub account_keys: Vec<String>,
}

/// Transaction status metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    /// Lamport balances before the transaction, one per account key
    #[serde(default)]
    pub pre_balances: Vec<u64>,
    /// Lamport balances after the transaction, one per account key
    #[serde(default)]
    pub post_balances: Vec<u64>,
    /// Accounts loaded from address lookup tables (v0 transactions)
    #[serde(default)]
    pub loaded_addresses: Option<LoadedAddresses>,
}

/// Addresses loaded through lookup tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedAddresses {
    #[serde(default)]
    pub writable: Vec<String>,
    #[serde(default)]
    pub readonly: Vec<String>,
}

impl TransactionDetail {
    /// Whether the record has a transaction section
    pub fn has_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Static account keys, empty when there is no transaction section
    pub fn account_keys(&self) -> &[String] {
        self.transaction
            .as_ref()
            .map(|tx| tx.message.account_keys.as_slice())
            .unwrap_or(&[])
    }

    /// Balance index of `wallet`.
    ///
    /// Returns the first occurrence among the static account keys. For v0
    /// transactions the search continues through the loaded writable and then
    /// readonly addresses, which is how balances are laid out.
    pub fn wallet_index(&self, wallet: &str) -> Option<usize> {
        let static_keys = self.account_keys();
        if let Some(index) = static_keys.iter().position(|key| key == wallet) {
            return Some(index);
        }

        let loaded = self.meta.as_ref()?.loaded_addresses.as_ref()?;
        loaded
            .writable
            .iter()
            .chain(loaded.readonly.iter())
            .position(|key| key == wallet)
            .map(|offset| static_keys.len() + offset)
    }

    /// Signed lamport change of the account at `index`.
    ///
    /// `None` when the metadata or either balance entry is missing, or the
    /// balances do not fit in an `i64`.
    pub fn balance_delta(&self, index: usize) -> Option<i64> {
        let meta = self.meta.as_ref()?;
        let pre = i64::try_from(*meta.pre_balances.get(index)?).ok()?;
        let post = i64::try_from(*meta.post_balances.get(index)?).ok()?;
        Some(post - pre)
    }

    /// First signature of the transaction, if present
    pub fn signature(&self) -> Option<&str> {
        self.transaction
            .as_ref()
            .and_then(|tx| tx.signatures.first())
            .map(String::as_str)
    }
}
