use crate::harvester::FetchResult;
use crate::metadata::{ElementEntry, ParseError};
use crate::output::traits::{ExtractionPass, HarvestEvent, Reporter};
use std::path::Path;

/// Reporter that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<HarvestEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announced link addresses, in order
    pub fn links(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HarvestEvent::LinkFound(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Values of every targeted lookup, in order
    pub fn field_sets(&self) -> Vec<&[String]> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HarvestEvent::Fields { values, .. } => Some(values.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Number of failed extraction passes
    pub fn parse_failures(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, HarvestEvent::ParseFailed { .. }))
            .count()
    }
}

impl Reporter for RecordingReporter {
    fn link_found(&mut self, url: &str) {
        self.events.push(HarvestEvent::LinkFound(url.to_string()));
    }

    fn downloaded(&mut self, result: &FetchResult) {
        self.events.push(HarvestEvent::Downloaded(result.clone()));
    }

    fn preview(&mut self, path: &Path, preview: &str) {
        self.events.push(HarvestEvent::Preview {
            path: path.to_path_buf(),
            text: preview.to_string(),
        });
    }

    fn fields(&mut self, path: &Path, values: &[String]) {
        self.events.push(HarvestEvent::Fields {
            path: path.to_path_buf(),
            values: values.to_vec(),
        });
    }

    fn element(&mut self, entry: &ElementEntry) {
        self.events.push(HarvestEvent::Element(entry.clone()));
    }

    fn parse_failed(&mut self, path: &Path, pass: ExtractionPass, error: &ParseError) {
        self.events.push(HarvestEvent::ParseFailed {
            path: path.to_path_buf(),
            pass,
            error: error.clone(),
        });
    }
}
