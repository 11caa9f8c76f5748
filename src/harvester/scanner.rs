//! Index page scanner
//!
//! Extracts the references of every `<a href>` in a directory listing that
//! ends with the harvested extension. The HTML is tokenized best-effort, so a
//! broken listing only yields fewer (or zero) links, never an error.

use crate::config::DEFAULT_EXTENSION;
use scraper::{Html, Selector};

/// Scans an index page for links ending in `.xml`
///
/// # Example
///
/// ```
/// use waf_harvest::harvester::scan;
///
/// let html = r#"<a href="a.xml">a</a> <a href="b.txt">b</a> <a href="c.xml">c</a>"#;
/// assert_eq!(scan(html), vec!["a.xml", "c.xml"]);
/// ```
pub fn scan(html: &str) -> Vec<String> {
    scan_with_extension(html, DEFAULT_EXTENSION)
}

/// Scans an index page for links whose reference ends with `extension`
///
/// The match is a case-sensitive suffix test on the raw attribute value.
/// References are returned in document order; duplicates are kept.
pub fn scan_with_extension(html: &str, extension: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if href.ends_with(extension) {
                    links.push(href.to_string());
                }
            }
        }
    }

    links
}
