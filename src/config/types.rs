use serde::Deserialize;

/// Default file extension a link must end with to be harvested
pub const DEFAULT_EXTENSION: &str = ".xml";

/// Default number of characters shown in a document preview
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// Default size of each chunk written to disk (bytes)
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Main configuration structure for WAF-Harvest
///
/// Every section is optional in the TOML file; missing sections fall back to
/// their defaults so a harvest can run without any configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the harvester
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the harvester
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the operator
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,

    /// Email address for operator contact
    #[serde(rename = "contact-email", default)]
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
            contact_email: None,
        }
    }
}

/// Harvest behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestConfig {
    /// Case-sensitive suffix a link must carry to be downloaded
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Number of characters printed from each downloaded document
    #[serde(rename = "preview-chars", default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Maximum number of bytes written per chunk
    #[serde(rename = "chunk-size", default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Whole-request timeout in seconds; absent means wait indefinitely
    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,

    /// Whether to print every element of each document
    #[serde(default = "default_enumerate")]
    pub enumerate: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            preview_chars: default_preview_chars(),
            chunk_size: default_chunk_size(),
            request_timeout_secs: None,
            enumerate: default_enumerate(),
        }
    }
}

fn default_crawler_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_enumerate() -> bool {
    true
}
