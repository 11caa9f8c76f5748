//! WAF-Harvest: mirror a metadata catalog's web accessible folder
//!
//! This crate scrapes the HTML directory listing of a catalog endpoint (for
//! example an ERDDAP `metadata/iso19115/xml/` folder), downloads every linked
//! XML metadata record to a local directory, and summarises the content of
//! each record as it lands.

pub mod config;
pub mod harvester;
pub mod metadata;
pub mod output;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for harvest operations
///
/// Every variant is fatal to a run. Malformed metadata documents are reported
/// through [`metadata::ParseError`] instead, which the harvester never
/// escalates.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Failed to retrieve {url} with status code {status}")]
    Fetch { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Link reference is empty")]
    EmptyReference,
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::Config;
pub use harvester::{FetchResult, HarvestSummary, Harvester};
pub use metadata::{ElementEntry, ParseError, XmlDocument};
pub use crate::url::{join_link, local_file_name, normalize_base};
