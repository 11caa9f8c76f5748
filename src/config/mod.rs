//! Configuration module for WAF-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. A harvest without a file runs on the defaults.
//!
//! # Example
//!
//! ```no_run
//! use waf_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Harvesting links ending in {}", config.harvest.extension);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HarvestConfig, UserAgentConfig, DEFAULT_CHUNK_SIZE, DEFAULT_EXTENSION,
    DEFAULT_PREVIEW_CHARS,
};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
