//! Field extraction passes over parsed metadata documents

use crate::metadata::document::{Element, ParseError, XmlDocument};
use crate::metadata::namespaces::{PathStep, BAND_NAME_PATH};

/// One element reported by the full enumeration pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementEntry {
    /// Tag in Clark notation
    pub tag: String,
    /// Direct text content, if any
    pub text: Option<String>,
}

/// Returns at most the first `max_chars` characters of `text`
///
/// Counts Unicode scalar values, so the cut never splits a character.
pub fn extract_preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Parses `text` and collects the band names of its coverage description
///
/// # Errors
///
/// Returns the [`ParseError`] if `text` is not a well-formed document. A
/// document without any band names is not an error and yields an empty vec.
///
/// # Example
///
/// ```
/// use waf_harvest::metadata::extract_fields;
///
/// let values = extract_fields("<gmi:MI_Metadata xmlns:gmi=\"http://www.isotc211.org/2005/gmi\"/>").unwrap();
/// assert!(values.is_empty());
/// ```
pub fn extract_fields(text: &str) -> Result<Vec<String>, ParseError> {
    let document = XmlDocument::parse(text)?;
    Ok(field_values(&document))
}

/// Parses `text` and reports every element's tag and direct text
pub fn enumerate_all(text: &str) -> Result<Vec<ElementEntry>, ParseError> {
    let document = XmlDocument::parse(text)?;
    Ok(element_entries(&document))
}

/// Band names of an already parsed document
pub fn field_values(document: &XmlDocument) -> Vec<String> {
    select(document.root(), BAND_NAME_PATH)
        .into_iter()
        .filter_map(|leaf| leaf.text.as_deref())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every element of an already parsed document, depth-first in document order
pub fn element_entries(document: &XmlDocument) -> Vec<ElementEntry> {
    document
        .iter()
        .map(|element| ElementEntry {
            tag: element.tag.clone(),
            text: element.text.clone(),
        })
        .collect()
}

/// Evaluates a `.//first/second/...` path below `root`
///
/// The first step matches any descendant of `root` (not `root` itself); each
/// later step matches direct children, or children of its `via` wrapper.
/// Results keep document order.
fn select<'a>(root: &'a Element, path: &[PathStep]) -> Vec<&'a Element> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };

    let mut context: Vec<&Element> = root
        .iter()
        .skip(1)
        .filter(|element| first.name.matches(&element.tag))
        .collect();

    for step in rest {
        context = context
            .into_iter()
            .flat_map(|element| step_matches(element, step))
            .collect();
    }

    context
}

fn step_matches<'a>(parent: &'a Element, step: &PathStep) -> Vec<&'a Element> {
    let mut found = Vec::new();
    for child in &parent.children {
        if step.name.matches(&child.tag) {
            found.push(child);
        } else if step.via.is_some_and(|wrapper| wrapper.matches(&child.tag)) {
            found.extend(
                child
                    .children
                    .iter()
                    .filter(|grandchild| step.name.matches(&grandchild.tag)),
            );
        }
    }
    found
}
