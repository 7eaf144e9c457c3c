//! Inventra CLI - Component inventory for nested archives
//!
//! Scans a file or directory tree for embedded java components and
//! prints one identity line per discovered component.

mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use inventra_core::{ScanArchiveUseCase, ScanConfig, ScanError};

use crate::output::OutputFormat;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "inventra")]
#[command(about = "Inventory embedded components inside nested archives")]
#[command(version)]
struct Cli {
    /// Archive file or directory to scan
    path: PathBuf,

    /// Product name label attached to every record
    #[arg(long, default_value = "")]
    product: String,

    /// Product version label attached to every record
    #[arg(long, default_value = "")]
    product_version: String,

    /// Output format
    #[arg(long, value_enum, default_value = "purl")]
    format: OutputFormat,

    /// Maximum concurrently processed entries
    #[arg(long, default_value_t = 8)]
    max_concurrency: usize,

    /// Scratch directory for archive extraction (defaults to the
    /// platform temp directory)
    #[arg(long)]
    scratch_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "scan failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ScanConfig {
        product_name: cli.product,
        product_version: cli.product_version,
        max_concurrency: cli.max_concurrency,
        scratch_root: cli.scratch_root,
        ..Default::default()
    };

    let use_case = ScanArchiveUseCase::with_config(config);
    let records = use_case.execute(&cli.path).await.map_err(|e| match e {
        ScanError::InputNotFound(path) => {
            anyhow::anyhow!("input path does not exist: {}", path.display())
        }
        other => anyhow::Error::new(other),
    })?;

    let rendered = output::render(&output::sorted(records), cli.format)
        .context("failed to render scan results")?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}
