//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the HTTP client with the configured user agent
//! - GET requests for the index page
//! - Streaming GET requests that write a linked document to disk
//!
//! Anything other than `200 OK` is a [`HarvestError::Fetch`]. There is no
//! retry; the caller decides what a failure means for the run.

use crate::config::{Config, UserAgentConfig};
use crate::HarvestError;
use reqwest::{Client, Response, StatusCode};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

/// A completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// Address the document was requested from
    pub url: String,
    /// Local file the body was written to
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes: u64,
}

/// Formats the user agent string
///
/// `Name/Version`, followed by `(+ContactURL; ContactEmail)` when either
/// contact detail is configured.
pub fn user_agent(config: &UserAgentConfig) -> String {
    let contact: Vec<String> = config
        .contact_url
        .iter()
        .map(|url| format!("+{}", url))
        .chain(config.contact_email.iter().cloned())
        .collect();

    if contact.is_empty() {
        format!("{}/{}", config.crawler_name, config.crawler_version)
    } else {
        format!(
            "{}/{} ({})",
            config.crawler_name,
            config.crawler_version,
            contact.join("; ")
        )
    }
}

/// Builds an HTTP client with proper configuration
///
/// No timeout is set unless `request-timeout-secs` is configured, so a
/// stalled server stalls the harvest.
///
/// # Example
///
/// ```no_run
/// use waf_harvest::config::Config;
/// use waf_harvest::harvester::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent(&config.user_agent))
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.harvest.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a page and returns its body as text
///
/// Used for the index page.
///
/// # Errors
///
/// * [`HarvestError::Fetch`] - The server answered with anything but 200
/// * [`HarvestError::Http`] - The request or body read failed
pub async fn fetch(client: &Client, url: &Url) -> Result<String, HarvestError> {
    let response = send(client, url).await?;

    response.text().await.map_err(|source| HarvestError::Http {
        url: url.to_string(),
        source,
    })
}

/// Fetches a document and streams it into `destination`
///
/// The file is created (or truncated) only after a 200 response arrives.
/// The body is written in pieces of at most `chunk_size` bytes, each flushed
/// as it is written. On a write or transport error the partial file is left
/// in place.
///
/// # Errors
///
/// * [`HarvestError::Fetch`] - The server answered with anything but 200
/// * [`HarvestError::Http`] - The request or body stream failed
/// * [`HarvestError::Write`] - Creating or writing the file failed
pub async fn fetch_to_file(
    client: &Client,
    url: &Url,
    destination: &Path,
    chunk_size: usize,
) -> Result<FetchResult, HarvestError> {
    let mut response = send(client, url).await?;

    let write_error = |source: std::io::Error| HarvestError::Write {
        path: destination.to_path_buf(),
        source,
    };

    let mut file = File::create(destination).await.map_err(write_error)?;
    let mut bytes_written: u64 = 0;

    while let Some(body) = response
        .chunk()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?
    {
        if body.is_empty() {
            continue;
        }

        for piece in body.chunks(chunk_size.max(1)) {
            file.write_all(piece).await.map_err(write_error)?;
            file.flush().await.map_err(write_error)?;
            bytes_written += piece.len() as u64;
        }
    }

    tracing::debug!(
        "Wrote {} bytes from {} to {}",
        bytes_written,
        url,
        destination.display()
    );

    Ok(FetchResult {
        url: url.to_string(),
        path: destination.to_path_buf(),
        bytes: bytes_written,
    })
}

/// Sends a GET request and rejects any status other than 200
async fn send(client: &Client, url: &Url) -> Result<Response, HarvestError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(HarvestError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}
