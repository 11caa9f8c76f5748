//! Harvest coordinator - main pipeline orchestration logic
//!
//! This module drives a harvest run end to end:
//! - Fetching the index page and scanning it for links
//! - Downloading each linked document, strictly one at a time
//! - Running the preview, field lookup and enumeration passes
//! - Reporting every step to a [`Reporter`]
//!
//! A failed download ends the run. A document that does not parse is
//! reported and skipped.

use crate::config::Config;
use crate::harvester::fetcher::{build_http_client, fetch, fetch_to_file, FetchResult};
use crate::harvester::scanner::scan_with_extension;
use crate::metadata::namespaces::{describe_path, BAND_NAME_PATH};
use crate::metadata::{element_entries, extract_preview, field_values, XmlDocument};
use crate::output::{ExtractionPass, Reporter};
use crate::url::{join_link, local_file_name, normalize_base};
use crate::Result;
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

/// Outcome of a completed harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Link references found on the index page, in document order
    pub links: Vec<String>,
    /// Completed downloads, in the order they finished
    pub downloads: Vec<FetchResult>,
    /// Extraction passes that failed to parse their document
    pub parse_failures: usize,
}

impl HarvestSummary {
    /// Total bytes written across all downloads
    pub fn total_bytes(&self) -> u64 {
        self.downloads.iter().map(|d| d.bytes).sum()
    }
}

/// Main harvest coordinator structure
pub struct Harvester<R: Reporter> {
    config: Config,
    client: Client,
    base: Url,
    destination: PathBuf,
    reporter: R,
}

impl<R: Reporter> Harvester<R> {
    /// Creates a new harvester instance
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    /// * `base` - Catalog base address; trailing slashes are stripped
    /// * `destination` - Existing directory the documents are written into
    /// * `reporter` - Sink for progress events
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run
    /// * `Err(HarvestError)` - The base address is invalid or the client failed to build
    pub fn new(
        config: Config,
        base: &str,
        destination: impl Into<PathBuf>,
        reporter: R,
    ) -> Result<Self> {
        let base = normalize_base(base)?;
        let client = build_http_client(&config)?;

        Ok(Self {
            config,
            client,
            base,
            destination: destination.into(),
            reporter,
        })
    }

    /// The normalized base address
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The reporter receiving this harvest's events
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Consumes the harvester and returns its reporter
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Fetches the index page and returns the qualifying link references
    pub async fn discover(&self) -> Result<Vec<String>> {
        tracing::info!("Fetching index from {}", self.base);
        let html = fetch(&self.client, &self.base).await?;

        let links = scan_with_extension(&html, &self.config.harvest.extension);
        tracing::info!(
            "Found {} links ending in {}",
            links.len(),
            self.config.harvest.extension
        );

        Ok(links)
    }

    /// Runs the full pipeline
    ///
    /// The first fetch or write error is returned immediately; files already
    /// downloaded stay on disk and the remaining links are not touched.
    pub async fn run(&mut self) -> Result<HarvestSummary> {
        let links = self.discover().await?;

        let mut summary = HarvestSummary {
            links: links.clone(),
            ..HarvestSummary::default()
        };

        for href in &links {
            let result = self.harvest_link(href).await?;
            summary.parse_failures += self.inspect(&result.path).await?;
            summary.downloads.push(result);
        }

        tracing::info!(
            "Harvest completed: {} documents, {} bytes, {} parse failures",
            summary.downloads.len(),
            summary.total_bytes(),
            summary.parse_failures
        );

        Ok(summary)
    }

    /// Downloads one link into the destination directory
    pub async fn harvest_link(&mut self, href: &str) -> Result<FetchResult> {
        let url = join_link(&self.base, href)?;
        let destination = self.destination.join(local_file_name(href));

        self.reporter.link_found(url.as_str());

        let result = fetch_to_file(
            &self.client,
            &url,
            &destination,
            self.config.harvest.chunk_size,
        )
        .await?;

        self.reporter.downloaded(&result);
        Ok(result)
    }

    /// Runs the extraction passes over a downloaded file
    ///
    /// Returns the number of passes that failed to parse. The document is
    /// parsed once; when that parse fails, each pass reports the failure on
    /// its own. Bytes that are not UTF-8 fail the parse; the preview shows
    /// them as replacement characters.
    pub async fn inspect(&mut self, path: &Path) -> Result<usize> {
        let raw = tokio::fs::read(path).await?;

        let text = String::from_utf8_lossy(&raw);
        self.reporter
            .preview(path, extract_preview(&text, self.config.harvest.preview_chars));

        let document = XmlDocument::parse_bytes(&raw);
        let mut failures = 0;

        match &document {
            Ok(document) => {
                let values = field_values(document);
                tracing::debug!(
                    "{} values at {} in {}",
                    values.len(),
                    describe_path(BAND_NAME_PATH),
                    path.display()
                );
                self.reporter.fields(path, &values);
            }
            Err(e) => {
                tracing::warn!("Field lookup skipped for {}: {}", path.display(), e);
                self.reporter.parse_failed(path, ExtractionPass::Fields, e);
                failures += 1;
            }
        }

        if !self.config.harvest.enumerate {
            return Ok(failures);
        }

        match &document {
            Ok(document) => {
                for entry in element_entries(document) {
                    self.reporter.element(&entry);
                }
            }
            Err(e) => {
                tracing::warn!("Enumeration skipped for {}: {}", path.display(), e);
                self.reporter.parse_failed(path, ExtractionPass::Enumeration, e);
                failures += 1;
            }
        }

        Ok(failures)
    }
}
