//! WAF-Harvest main entry point
//!
//! This is the command-line interface for mirroring a catalog's metadata folder.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use waf_harvest::config::{load_or_default, Config};
use waf_harvest::harvester::{harvest, Harvester};
use waf_harvest::output::ConsoleReporter;
use waf_harvest::url::join_link;

/// WAF-Harvest: download and print metadata of ISO documents from an ERDDAP instance
///
/// Fetches the directory listing at the catalog address, downloads every
/// linked XML record into DESTINATION, and prints a preview, the band names
/// and every element of each record.
#[derive(Parser, Debug)]
#[command(name = "waf-harvest")]
#[command(version)]
#[command(about = "Download and print metadata of ISO documents from an ERDDAP instance", long_about = None)]
struct Cli {
    /// Folder to download the ISO documents into
    #[arg(value_name = "DESTINATION")]
    destination: PathBuf,

    /// URL to ERDDAP, example: https://erddap.icos-cp.eu/erddap/metadata/iso19115/xml/
    #[arg(short, long, value_name = "URL")]
    erddap: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the links found on the index page without downloading them
    #[arg(long)]
    list_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.list_only {
        handle_list_only(config, &cli.erddap, &cli.destination).await?;
    } else {
        ensure_destination(&cli.destination)?;
        handle_harvest(config, &cli.erddap, &cli.destination).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the harvest report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("waf_harvest=info,warn"),
            1 => EnvFilter::new("waf_harvest=debug,info"),
            2 => EnvFilter::new("waf_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Creates the destination directory if it doesn't exist
fn ensure_destination(destination: &Path) -> anyhow::Result<()> {
    if !destination.exists() {
        tracing::info!("Creating destination {}", destination.display());
        std::fs::create_dir_all(destination).with_context(|| {
            format!(
                "Failed to create destination directory {}",
                destination.display()
            )
        })?;
    }
    Ok(())
}

/// Handles the --list-only mode: prints what would be downloaded
async fn handle_list_only(
    config: Config,
    base: &str,
    destination: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let harvester = Harvester::new(config, base, destination, ConsoleReporter::stdout())?;
    let links = harvester.discover().await?;

    for href in &links {
        println!("{}", join_link(harvester.base(), href)?);
    }
    println!("\n{} documents would be downloaded", links.len());

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: Config,
    base: &str,
    destination: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Harvesting {} into {}",
        base,
        destination.display()
    );

    match harvest(config, base, destination).await {
        Ok(summary) => {
            tracing::info!(
                "Harvest finished: {} of {} links downloaded",
                summary.downloads.len(),
                summary.links.len()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
