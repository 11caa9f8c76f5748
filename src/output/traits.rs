//! Reporter trait and the events a harvest emits
//!
//! The harvester never prints directly. Every observable step of a run goes
//! through a [`Reporter`], so the console output and the test recorder see
//! exactly the same sequence.

use crate::harvester::FetchResult;
use crate::metadata::{ElementEntry, ParseError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which extraction pass a parse failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionPass {
    /// Lookup of the fixed band-name path
    Fields,
    /// Walk over every element
    Enumeration,
}

impl fmt::Display for ExtractionPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields => write!(f, "field lookup"),
            Self::Enumeration => write!(f, "enumeration"),
        }
    }
}

/// Sink for harvest progress
pub trait Reporter {
    /// A qualifying link was found and is about to be downloaded
    fn link_found(&mut self, url: &str);

    /// A document finished downloading
    fn downloaded(&mut self, result: &FetchResult);

    /// The opening characters of a downloaded document
    fn preview(&mut self, path: &Path, preview: &str);

    /// Values found by the targeted lookup (possibly none)
    fn fields(&mut self, path: &Path, values: &[String]);

    /// One element of the full enumeration
    fn element(&mut self, entry: &ElementEntry);

    /// An extraction pass could not parse the document
    fn parse_failed(&mut self, path: &Path, pass: ExtractionPass, error: &ParseError);
}

/// A single recorded reporter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    LinkFound(String),
    Downloaded(FetchResult),
    Preview { path: PathBuf, text: String },
    Fields { path: PathBuf, values: Vec<String> },
    Element(ElementEntry),
    ParseFailed {
        path: PathBuf,
        pass: ExtractionPass,
        error: ParseError,
    },
}
