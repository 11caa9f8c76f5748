//! Harvester module for mirroring a catalog's metadata records
//!
//! This module contains the core harvest logic, including:
//! - Scanning the HTML index page for qualifying links
//! - HTTP fetching of the index and streaming of each document to disk
//! - Overall pipeline coordination and progress reporting

mod coordinator;
mod fetcher;
mod scanner;

pub use coordinator::{HarvestSummary, Harvester};
pub use fetcher::{build_http_client, fetch, fetch_to_file, user_agent, FetchResult};
pub use scanner::{scan, scan_with_extension};

use crate::config::Config;
use crate::output::ConsoleReporter;
use crate::HarvestError;
use std::path::Path;

/// Runs a complete harvest, printing progress to standard output
///
/// This is the main entry point for a harvest. It will:
/// 1. Fetch the index page at `base`
/// 2. Scan it for links ending in the configured extension
/// 3. Download each link into `destination`
/// 4. Print a preview, the band names and every element of each document
///
/// `destination` must already exist.
///
/// # Returns
///
/// * `Ok(HarvestSummary)` - Every link was downloaded
/// * `Err(HarvestError)` - A fetch or write failed and the run stopped
pub async fn harvest(
    config: Config,
    base: &str,
    destination: &Path,
) -> Result<HarvestSummary, HarvestError> {
    let mut harvester = Harvester::new(config, base, destination, ConsoleReporter::stdout())?;
    harvester.run().await
}
