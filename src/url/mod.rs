//! URL handling module for WAF-Harvest
//!
//! This module normalizes the catalog base address, resolves discovered link
//! references against it with URL-join semantics, and derives the local file
//! name each link is saved under.

mod join;
mod normalize;

// Re-export main functions
pub use join::{join_link, local_file_name};
pub use normalize::normalize_base;
