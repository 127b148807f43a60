//! JSON-RPC client for wallet history
//!
//! Holds the signature fetcher and the transaction detail fetcher. Both
//! report an unsuccessful HTTP status as an empty result rather than an
//! error, so "no data" and "failed" look the same to callers.

mod request;

use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::config::ReportConfig;
use crate::constants::{DEFAULT_COMMITMENT, DEFAULT_SIGNATURE_LIMIT, DEFAULT_TIMEOUT_SECS};
use crate::errors::{ReportError, ReportResult};
use crate::models::{SignatureInfo, TransactionDetail};
use crate::report::TransactionSource;

use self::request::RpcResponse;

/// Outcome of a single RPC call
#[derive(Debug)]
enum RpcReply {
    /// The node returned a non-null result
    Result(Value),
    /// The call succeeded at the HTTP level but carried no result
    NoResult,
    /// The HTTP status was not a success
    Status(StatusCode),
}

/// Client for a Solana JSON-RPC endpoint
pub struct RpcClient {
    /// HTTP client
    client: Client,
    /// Endpoint URL, API key included
    endpoint: Url,
    /// Commitment level for `getTransaction`
    commitment: String,
}

impl RpcClient {
    /// Create a client from a validated configuration
    pub fn new(config: &ReportConfig) -> ReportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            commitment: config.commitment.clone(),
        })
    }

    /// Create a client for an endpoint that already carries its API key
    pub fn with_endpoint(endpoint: Url) -> ReportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            commitment: DEFAULT_COMMITMENT.to_string(),
        })
    }

    /// Get up to `limit` of the most recent signatures involving `wallet`.
    ///
    /// Returns an empty list if the node does not answer with a success status
    /// or returns no result.
    pub async fn get_transactions(&self, wallet: &str, limit: usize) -> ReportResult<Vec<SignatureInfo>> {
        let payload = request::signatures_for_address(wallet, limit);

        match self.call(&payload).await? {
            RpcReply::Result(result) => {
                let signatures: Vec<SignatureInfo> = serde_json::from_value(result)
                    .map_err(|e| ReportError::Rpc(format!("Invalid signature list for {}: {}", wallet, e)))?;
                debug!("Fetched {} signatures for {}", signatures.len(), wallet);
                Ok(signatures)
            }
            RpcReply::NoResult => Ok(Vec::new()),
            RpcReply::Status(status) => {
                warn!("Signature request for {} returned {}", wallet, status);
                Ok(Vec::new())
            }
        }
    }

    /// Get the most recent signatures involving `wallet`, using the default count
    pub async fn get_recent_transactions(&self, wallet: &str) -> ReportResult<Vec<SignatureInfo>> {
        self.get_transactions(wallet, DEFAULT_SIGNATURE_LIMIT).await
    }

    /// Get the full record of one transaction.
    ///
    /// Returns an empty record on failure; an unsuccessful HTTP status is also
    /// reported to the operator.
    pub async fn get_transaction_details(&self, signature: &str) -> ReportResult<TransactionDetail> {
        let payload = request::transaction(signature, &self.commitment);

        match self.call(&payload).await? {
            RpcReply::Result(result) => serde_json::from_value(result).map_err(|e| {
                ReportError::MalformedTransaction {
                    signature: signature.to_string(),
                    reason: e.to_string(),
                }
            }),
            RpcReply::NoResult => Ok(TransactionDetail::default()),
            RpcReply::Status(status) => {
                error!("failed: getTransaction {} returned {}", signature, status);
                Ok(TransactionDetail::default())
            }
        }
    }

    /// Post one JSON-RPC request
    async fn call(&self, payload: &Value) -> ReportResult<RpcReply> {
        let method = payload["method"].as_str().unwrap_or_default();
        debug!("POST {}", method);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| ReportError::Rpc(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(RpcReply::Status(status));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| ReportError::Rpc(format!("Invalid {} response: {}", method, e)))?;

        if let Some(err) = body.error {
            warn!("{} returned error {}: {}", method, err.code, err.message);
            return Ok(RpcReply::NoResult);
        }

        Ok(match body.result {
            Some(Value::Null) | None => RpcReply::NoResult,
            Some(result) => RpcReply::Result(result),
        })
    }
}

#[async_trait]
impl TransactionSource for RpcClient {
    async fn signatures(&self, wallet: &str, limit: usize) -> ReportResult<Vec<SignatureInfo>> {
        self.get_transactions(wallet, limit).await
    }

    async fn transaction(&self, signature: &str) -> ReportResult<TransactionDetail> {
        self.get_transaction_details(signature).await
    }
}
