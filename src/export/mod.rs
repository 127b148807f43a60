//! Report output: terminal table, CSV and JSON files


use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use log::info;
use serde::Serialize;

use crate::errors::{ErrorContext, ErrorExt, ReportError, ReportResult};
use crate::models::{RowRecord, WalletReport};

/// File format for a saved report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ReportError::Export(format!("Unknown export format: {}", other))),
        }
    }
}

/// JSON document written by [`save_json`]
#[derive(Serialize)]
struct JsonReport<'a> {
    wallet: &'a str,
    columns: [&'static str; 2],
    rows: Vec<RowRecord>,
}

/// Render the report as an aligned text table
pub fn render_table(report: &WalletReport) -> String {
    let [time_col, delta_col] = report.columns();
    let mut out = String::new();

    let _ = writeln!(out, "{:>12}  {:>20}", time_col, delta_col);
    for row in &report.rows {
        let time = row.time.map(|t| t.to_string()).unwrap_or_default();
        let _ = writeln!(out, "{:>12}  {:>20.9}", time, row.wallet_delta());
    }

    out
}

/// Save the report in the given format
pub fn save_report(report: &WalletReport, path: &Path, format: ExportFormat) -> ReportResult<PathBuf> {
    match format {
        ExportFormat::Csv => save_csv(report, path),
        ExportFormat::Json => save_json(report, path),
    }
}

/// Save the report as CSV with a `Time,Wallet Delta` header
pub fn save_csv(report: &WalletReport, path: &Path) -> ReportResult<PathBuf> {
    let absolute_path = prepare_path(path)?;
    let context = file_context(report, "write_csv", &absolute_path);

    let mut writer = csv::Writer::from_path(&absolute_path).with_context(context.clone())?;
    if report.is_empty() {
        // serialize() only writes the header alongside the first record
        writer.write_record(report.columns()).with_context(context.clone())?;
    }
    for record in report.records() {
        writer.serialize(record).with_context(context.clone())?;
    }
    writer.flush().with_context(context)?;

    info!("Saved {} rows to {}", report.len(), absolute_path.display());
    Ok(absolute_path)
}

/// Save the report as pretty-printed JSON
pub fn save_json(report: &WalletReport, path: &Path) -> ReportResult<PathBuf> {
    let absolute_path = prepare_path(path)?;
    let context = file_context(report, "write_json", &absolute_path);

    let document = JsonReport {
        wallet: &report.wallet,
        columns: report.columns(),
        rows: report.records(),
    };
    let json = serde_json::to_string_pretty(&document)?;
    fs::write(&absolute_path, json).with_context(context)?;

    info!("Saved {} rows to {}", report.len(), absolute_path.display());
    Ok(absolute_path)
}

/// Make `path` absolute and create its parent directories
fn prepare_path(path: &Path) -> ReportResult<PathBuf> {
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    if let Some(parent) = absolute_path.parent() {
        if !parent.exists() {
            info!("Creating directory: {}", parent.display());
            fs::create_dir_all(parent).with_simple_context("export", "create_output_dir")?;
        }
    }

    Ok(absolute_path)
}

fn file_context(report: &WalletReport, operation: &str, path: &Path) -> ErrorContext {
    ErrorContext {
        wallet: Some(report.wallet.clone()),
        component: "export".to_string(),
        operation: operation.to_string(),
        details: Some(path.display().to_string()),
    }
}
