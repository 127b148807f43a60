//! JSON-RPC 2.0 payloads and response envelopes

use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::{methods, MAX_SUPPORTED_TRANSACTION_VERSION};

/// Response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse {
    /// Call result; absent on error
    #[serde(default)]
    pub result: Option<Value>,
    /// Error object reported by the node
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Payload for `getSignaturesForAddress`
pub(crate) fn signatures_for_address(wallet: &str, limit: usize) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": methods::GET_SIGNATURES_FOR_ADDRESS,
        "params": [wallet, { "limit": limit }]
    })
}

/// Payload for `getTransaction`
pub(crate) fn transaction(signature: &str, commitment: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": methods::GET_TRANSACTION,
        "params": [
            signature,
            {
                "encoding": "json",
                "commitment": commitment,
                "maxSupportedTransactionVersion": MAX_SUPPORTED_TRANSACTION_VERSION
            }
        ]
    })
}
