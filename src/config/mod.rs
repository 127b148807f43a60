//! Report configuration and API key lookup

#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use log::debug;
use reqwest::Url;
use serde::Deserialize;

use crate::constants::{
    API_KEY_ENV, API_KEY_PARAM, DEFAULT_COMMITMENT, DEFAULT_REPORT_LIMIT, DEFAULT_RPC_URL,
    DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{ErrorContext, ErrorExt, ReportError, ReportResult};

/// What the report builder does when a transaction does not list the wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingWalletPolicy {
    /// Abort the whole report
    #[default]
    Fail,
    /// Log a warning and leave the transaction out
    Skip,
}

impl FromStr for MissingWalletPolicy {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            other => Err(ReportError::Config(format!("Unknown missing-wallet policy: {}", other))),
        }
    }
}

/// Validated configuration for fetching and building a report
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Full endpoint URL, API key included
    pub endpoint: Url,
    /// Commitment level for `getTransaction`
    pub commitment: String,
    /// Signatures to request per report
    pub signature_limit: usize,
    /// Detail fetches in flight at once
    pub concurrency: usize,
    /// Handling of transactions that do not list the wallet
    pub missing_wallet_policy: MissingWalletPolicy,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl ReportConfig {
    /// Start building a configuration
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::new()
    }
}

/// Builder for [`ReportConfig`]
#[derive(Debug, Clone)]
pub struct ReportConfigBuilder {
    api_key: Option<String>,
    base_url: String,
    commitment: String,
    signature_limit: usize,
    concurrency: usize,
    missing_wallet_policy: MissingWalletPolicy,
    timeout_secs: u64,
}

impl Default for ReportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportConfigBuilder {
    /// Create a builder with default settings and no API key
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_RPC_URL.to_string(),
            commitment: DEFAULT_COMMITMENT.to_string(),
            signature_limit: DEFAULT_REPORT_LIMIT,
            concurrency: 1,
            missing_wallet_policy: MissingWalletPolicy::Fail,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the RPC base URL
    pub fn with_rpc(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the commitment level
    pub fn with_commitment(mut self, commitment: impl Into<String>) -> Self {
        self.commitment = commitment.into();
        self
    }

    /// Set how many signatures to request
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.signature_limit = limit;
        self
    }

    /// Set how many detail fetches may run at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the missing-wallet policy
    pub fn with_missing_wallet_policy(mut self, policy: MissingWalletPolicy) -> Self {
        self.missing_wallet_policy = policy;
        self
    }

    /// Set the HTTP timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the settings and build the configuration
    pub fn build(self) -> ReportResult<ReportConfig> {
        if self.signature_limit == 0 {
            return Err(ReportError::Config("Signature limit must be at least 1".to_string()));
        }
        if self.concurrency == 0 {
            return Err(ReportError::Config("Concurrency must be at least 1".to_string()));
        }
        if self.commitment.trim().is_empty() {
            return Err(ReportError::Config("Commitment must not be empty".to_string()));
        }

        let mut endpoint = Url::parse(&self.base_url).with_context(ErrorContext {
            wallet: None,
            component: "config".to_string(),
            operation: "parse_rpc_url".to_string(),
            details: Some(self.base_url.clone()),
        })?;

        let has_key_param = endpoint.query_pairs().any(|(name, _)| name == API_KEY_PARAM);
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {
                // An explicit key replaces any key already in the URL
                let others: Vec<(String, String)> = endpoint
                    .query_pairs()
                    .filter(|(name, _)| name != API_KEY_PARAM)
                    .map(|(name, value)| (name.into_owned(), value.into_owned()))
                    .collect();
                let mut pairs = endpoint.query_pairs_mut();
                pairs.clear();
                for (name, value) in &others {
                    pairs.append_pair(name, value);
                }
                pairs.append_pair(API_KEY_PARAM, key);
            }
            _ if has_key_param => {}
            _ => {
                return Err(ReportError::Config(format!(
                    "No API key provided; set {} or pass --api-key",
                    API_KEY_ENV
                )));
            }
        }

        Ok(ReportConfig {
            endpoint,
            commitment: self.commitment,
            signature_limit: self.signature_limit,
            concurrency: self.concurrency,
            missing_wallet_policy: self.missing_wallet_policy,
            timeout_secs: self.timeout_secs,
        })
    }
}

/// Contents of the optional config file
#[derive(Debug, Deserialize)]
struct ConfigFile {
    helius_key: Option<String>,
}

/// Get the default config file path
pub fn config_file_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("solana-wallet-delta").join("config.json")
}

/// Read the API key from a config file, `None` if the file does not exist
pub fn read_key_file(path: &Path) -> ReportResult<Option<String>> {
    if !path.exists() {
        debug!("No config file at {}", path.display());
        return Ok(None);
    }

    let context = ErrorContext {
        wallet: None,
        component: "config".to_string(),
        operation: "read_config_file".to_string(),
        details: Some(path.display().to_string()),
    };
    let json = fs::read_to_string(path).with_context(context.clone())?;
    let file: ConfigFile = serde_json::from_str(&json).with_context(context)?;

    Ok(file.helius_key.filter(|key| !key.trim().is_empty()))
}

/// Resolve the API key: explicit value, then the environment, then the config file
pub fn resolve_api_key(explicit: Option<String>) -> ReportResult<Option<String>> {
    if let Some(key) = explicit.filter(|key| !key.trim().is_empty()) {
        return Ok(Some(key));
    }
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            debug!("Using API key from {}", API_KEY_ENV);
            return Ok(Some(key));
        }
    }
    read_key_file(&config_file_path())
}
