//! Output module for reporting harvest progress
//!
//! This module handles:
//! - The [`Reporter`] trait the harvester reports through
//! - Console output of links, downloads, previews and extracted fields
//! - In-memory recording of events for inspection and tests

mod console;
mod recorder;
mod traits;

pub use console::ConsoleReporter;
pub use recorder::RecordingReporter;
pub use traits::{ExtractionPass, HarvestEvent, Reporter};
