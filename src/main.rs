use anyhow::Result;
use solana_wallet_delta::config::resolve_api_key;
use solana_wallet_delta::export::{render_table, save_report, ExportFormat};
use solana_wallet_delta::{build_report, MissingWalletPolicy, ReportConfig};
use std::path::PathBuf;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::io::Write;

// Simple CLI without clap
#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize logger
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        println!("Solana Wallet Delta v{}", solana_wallet_delta::VERSION);
        return Ok(());
    }

    if args.len() < 2 || args[1].starts_with('-') {
        print_usage(&args[0]);
        return Ok(());
    }

    let wallet = &args[1];

    // Parse optional arguments
    let mut builder = ReportConfig::builder();
    let mut api_key = None;
    let mut output_path: Option<PathBuf> = None;
    let mut format = None;

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        let takes_value = matches!(
            flag,
            "--limit" | "-n" | "--api-key" | "--rpc" | "-c" | "--commitment" | "--timeout"
                | "--concurrency" | "--on-missing" | "--output" | "-o" | "--format"
        );
        let value = if takes_value {
            match args.get(i + 1) {
                Some(value) => value.clone(),
                None => {
                    println!("Error: Missing value for {}", flag);
                    return Ok(());
                }
            }
        } else {
            String::new()
        };

        match flag {
            "--limit" | "-n" => builder = builder.with_limit(value.parse()?),
            "--api-key" => api_key = Some(value),
            "--rpc" | "-c" => builder = builder.with_rpc(value),
            "--commitment" => builder = builder.with_commitment(value),
            "--timeout" => builder = builder.with_timeout(value.parse()?),
            "--concurrency" => builder = builder.with_concurrency(value.parse()?),
            "--on-missing" => {
                builder = builder.with_missing_wallet_policy(value.parse::<MissingWalletPolicy>()?);
            }
            "--output" | "-o" => output_path = Some(PathBuf::from(value)),
            "--format" => format = Some(value.parse::<ExportFormat>()?),
            "--skip-missing" => {
                builder = builder.with_missing_wallet_policy(MissingWalletPolicy::Skip);
            }
            _ => println!("Unknown argument: {}", flag),
        }
        i += if takes_value { 2 } else { 1 };
    }

    if let Some(key) = resolve_api_key(api_key)? {
        builder = builder.with_api_key(key);
    }
    let config = builder.build()?;

    info!("Fetching up to {} transactions for wallet: {}", config.signature_limit, wallet);
    let report = build_report(wallet, &config).await?;

    match output_path {
        Some(path) => {
            let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
            let written = save_report(&report, &path, format)?;
            println!("Saved {} rows to: {}", report.len(), written.display());
        }
        None => print!("{}", render_table(&report)),
    }

    Ok(())
}

fn print_usage(program: &str) {
    println!("Solana Wallet Delta v{}", solana_wallet_delta::VERSION);
    println!("\nUsage:");
    println!("  {} <WALLET> [--limit N] [--api-key KEY] [--rpc URL] [--commitment LEVEL] [--timeout SECS] [--concurrency N] [--on-missing fail|skip] [--output PATH] [--format csv|json]", program);
    println!("  {} --version", program);
    println!("\nOptions:");
    println!("  --limit, -n N        Number of recent transactions to report (default: 100)");
    println!("  --api-key KEY        Helius API key (default: $HELIUS_KEY or the config file)");
    println!("  --rpc, -c URL        Use the specified RPC URL (default: Helius mainnet)");
    println!("  --commitment LEVEL   Commitment for transaction lookups (default: confirmed)");
    println!("  --timeout SECS       HTTP request timeout (default: 30)");
    println!("  --concurrency N      Fetch up to N transactions at once (default: 1)");
    println!("  --on-missing POLICY  fail or skip transactions that do not list the wallet (default: fail)");
    println!("  --skip-missing       Same as --on-missing skip");
    println!("  --output, -o PATH    Save the report to PATH instead of printing it");
    println!("  --format FORMAT      csv or json (default: from the file extension)");
    println!("  --version, -v        Show version information");
}
