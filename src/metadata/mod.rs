//! Metadata module for inspecting downloaded ISO 19115 records
//!
//! This module contains:
//! - A strict, namespace-aware XML element tree
//! - The fixed namespace table and band-name path
//! - The targeted lookup, full enumeration and preview passes

mod document;
mod extract;
pub mod namespaces;

pub use document::{Descendants, Element, ParseError, XmlDocument};
pub use extract::{
    element_entries, enumerate_all, extract_fields, extract_preview, field_values, ElementEntry,
};
