//! Constants used throughout the report

/// Default Helius mainnet JSON-RPC endpoint; the API key is appended as a query parameter
pub const DEFAULT_RPC_URL: &str = "https://mainnet.helius-rpc.com/";

/// Query parameter carrying the API key
pub const API_KEY_PARAM: &str = "api-key";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "HELIUS_KEY";

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Signatures requested by the signature fetcher when no count is given
pub const DEFAULT_SIGNATURE_LIMIT: usize = 50;

/// Signatures requested by the report builder when no count is given
pub const DEFAULT_REPORT_LIMIT: usize = 100;

/// Commitment level for `getTransaction`
pub const DEFAULT_COMMITMENT: &str = "confirmed";

/// Highest transaction version the detail fetcher accepts
pub const MAX_SUPPORTED_TRANSACTION_VERSION: u8 = 0;

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Column labels of the report table
pub const REPORT_COLUMNS: [&str; 2] = ["Time", "Wallet Delta"];

/// JSON-RPC method names
pub mod methods {
    pub const GET_SIGNATURES_FOR_ADDRESS: &str = "getSignaturesForAddress";
    pub const GET_TRANSACTION: &str = "getTransaction";
}
