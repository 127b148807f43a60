//! Error handling for the wallet delta report.
//!
//! Transport failures are not errors here: the fetchers report them as empty
//! results. Everything that aborts a report, or that the CLI has to surface,
//! goes through [`ReportError`].

use thiserror::Error;
use std::fmt;

/// Main error type for the wallet delta report.
///
/// This enum represents everything that can abort building or saving a
/// report. Each variant corresponds to a category of failure, with a message
/// or fields describing the specific case.
#[derive(Error, Debug)]
pub enum ReportError {
    /// RPC communication failed before any HTTP status was received.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Invalid or missing configuration, such as an absent API key.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The wallet does not appear among the transaction's account keys.
    #[error("Wallet {wallet} not found in account keys of transaction {signature}")]
    WalletNotFound {
        /// Wallet that was searched for
        wallet: String,
        /// Transaction being processed
        signature: String,
    },

    /// A transaction record is missing a field the report depends on.
    #[error("Malformed transaction {signature}: {reason}")]
    MalformedTransaction {
        /// Transaction being processed
        signature: String,
        /// What was missing or out of range
        reason: String,
    },

    /// A capability that exists as an interface only.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Errors while writing a report.
    #[error("Export error: {0}")]
    Export(String),

    /// Errors related to file I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failures.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client failures.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for the wallet delta report.
///
/// This type alias simplifies the use of `Result` with `ReportError`.
pub type ReportResult<T> = Result<T, ReportError>;

/// Context information for errors.
///
/// Records where an error occurred: the wallet being reported on, the
/// component and operation, and free-form details such as a file path.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Wallet being reported on, if applicable.
    pub wallet: Option<String>,

    /// Component where the error occurred (e.g., "config").
    pub component: String,

    /// Operation being performed when the error occurred (e.g., "read_config_file").
    pub operation: String,

    /// Additional context details, such as a file path.
    pub details: Option<String>,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "In {} while {}", self.component, self.operation)?;
        if let Some(wallet) = &self.wallet {
            write!(f, " for wallet {}", wallet)?;
        }
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Extension trait for adding context to errors.
///
/// Converts foreign errors (I/O, JSON, URL parsing, CSV) into a
/// [`ReportError`] whose message says where they happened.
pub trait ErrorExt<T> {
    /// Add context to an error.
    ///
    /// Errors that already are a [`ReportError`] keep their variant; anything
    /// else is classified by the component that produced it (`config`,
    /// `rpc` or `export`), falling back to an I/O error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context information to add to the error.
    ///
    /// # Returns
    ///
    /// A result with the original value or an error with added context.
    fn with_context(self, context: ErrorContext) -> ReportResult<T>;

    /// Add context naming only the component and operation.
    ///
    /// # Arguments
    ///
    /// * `component` - The component where the error occurred.
    /// * `operation` - The operation being performed when the error occurred.
    ///
    /// # Returns
    ///
    /// A result with the original value or an error with added context.
    fn with_simple_context(self, component: &str, operation: &str) -> ReportResult<T>;
}

impl<T, E: std::error::Error + 'static> ErrorExt<T> for Result<T, E> {
    fn with_context(self, context: ErrorContext) -> ReportResult<T> {
        self.map_err(|e| {
            let error_msg = format!("{}: {}", context, e);
            let boxed: Box<dyn std::error::Error + 'static> = Box::new(e);
            match boxed.downcast::<ReportError>() {
                Ok(report_err) => *report_err,
                Err(_) => match context.component.as_str() {
                    "config" => ReportError::Config(error_msg),
                    "rpc" => ReportError::Rpc(error_msg),
                    "export" => ReportError::Export(error_msg),
                    _ => ReportError::Io(std::io::Error::new(std::io::ErrorKind::Other, error_msg)),
                },
            }
        })
    }

    fn with_simple_context(self, component: &str, operation: &str) -> ReportResult<T> {
        self.with_context(ErrorContext {
            wallet: None,
            component: component.to_string(),
            operation: operation.to_string(),
            details: None,
        })
    }
}
