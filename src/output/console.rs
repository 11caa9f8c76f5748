use crate::harvester::FetchResult;
use crate::metadata::{ElementEntry, ParseError};
use crate::output::traits::{ExtractionPass, Reporter};
use std::io::Write;
use std::path::Path;

/// Reporter that writes the human-readable run log
///
/// Generic over the writer so tests can capture the exact text; the binary
/// uses [`ConsoleReporter::stdout`].
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<std::io::Stdout> {
    /// Reporter printing to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        // A closed stdout must not abort the harvest
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::debug!("Failed to write report line: {}", e);
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn link_found(&mut self, url: &str) {
        self.line(format_args!("Found XML file: {}", url));
    }

    fn downloaded(&mut self, result: &FetchResult) {
        self.line(format_args!("Downloaded file to {}", result.path.display()));
    }

    fn preview(&mut self, path: &Path, preview: &str) {
        self.line(format_args!("Preview of {}:", path.display()));
        self.line(format_args!("{}", preview));
    }

    fn fields(&mut self, _path: &Path, values: &[String]) {
        if values.is_empty() {
            self.line(format_args!("No values found"));
        } else {
            self.line(format_args!("Extracted values: {}", values.join(", ")));
        }
    }

    fn element(&mut self, entry: &ElementEntry) {
        self.line(format_args!(
            "{}: {}",
            entry.tag,
            entry.text.as_deref().unwrap_or("")
        ));
    }

    fn parse_failed(&mut self, path: &Path, pass: ExtractionPass, error: &ParseError) {
        self.line(format_args!(
            "Failed to parse {} ({}): {}",
            path.display(),
            pass,
            error
        ));
    }
}
