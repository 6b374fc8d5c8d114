//! CLI entry point for the shooting_trends report tool.
//!
//! Provides subcommands for running the full report pipeline over the NYC
//! Open Data shooting incident CSV and for inspecting the cleaner's
//! null-count diagnostic.

use anyhow::Result;
use clap::{Parser, Subcommand};
use shooting_trends::report::{DEFAULT_DATA_URL, build_report, write_report};
use shooting_trends::{
    clean,
    fetch::{BasicClient, fetch_bytes},
    table::parse_table,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "shooting_trends")]
#[command(about = "Aggregates and models NYPD shooting incident data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the aggregate tables and model fits
    Report {
        /// CSV source: a URL or a local file path
        #[arg(short, long, default_value = DEFAULT_DATA_URL)]
        source: String,

        /// Directory to write the report artifacts to
        #[arg(short, long, default_value = "report")]
        output_dir: String,
    },
    /// Load and clean the dataset, then log per-column null counts
    NullCounts {
        /// CSV source: a URL or a local file path
        #[arg(short, long, default_value = DEFAULT_DATA_URL)]
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/shooting_trends.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("shooting_trends.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { source, output_dir } => {
            let bytes = fetcher(&source).await?;
            let report = build_report(&bytes)?;
            write_report(&report, Path::new(&output_dir))?;

            info!(
                slope = report.linear_fit.slope,
                intercept = report.linear_fit.intercept,
                r_squared = report.linear_fit.r_squared,
                "Linear fit of murders on shootings across hour buckets"
            );
        }
        Commands::NullCounts { source } => {
            let bytes = fetcher(&source).await?;
            let mut raw = parse_table(&bytes)?;

            let scrubbed = clean::scrub_sentinels(&mut raw);
            info!(scrubbed, "Sentinel cells normalized");
            for (column, nulls) in clean::null_counts(&raw) {
                info!(column = %column, nulls, "Null count");
            }
        }
    }

    Ok(())
}

/// Loads CSV data from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %source))]
async fn fetcher(source: &String) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, source).await?
    } else {
        std::fs::read(source)?
    };
    Ok(bytes)
}
