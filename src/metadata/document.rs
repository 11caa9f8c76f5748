//! In-memory element tree built from raw XML text
//!
//! The parser is strict: anything that is not a well-formed, namespace-valid
//! document is rejected with a [`ParseError`] instead of being repaired.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use thiserror::Error;

/// Errors raised while building an [`XmlDocument`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{message} at position {position}")]
    Syntax { position: u64, message: String },

    #[error("unbound prefix '{prefix}' at position {position}")]
    UnboundPrefix { prefix: String, position: u64 },

    #[error("unclosed element <{0}>")]
    UnclosedElement(String),

    #[error("no element found")]
    NoRoot,

    #[error("junk after document element at position {0}")]
    MultipleRoots(u64),

    #[error("text outside the root element at position {0}")]
    TextOutsideRoot(u64),
}

/// A single element of the tree
///
/// `tag` uses Clark notation (`{namespace-uri}local`) for namespaced elements
/// and the bare local name otherwise. `text` holds only the character data
/// that appears before the first child element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    fn new(tag: String) -> Self {
        Self {
            tag,
            text: None,
            children: Vec::new(),
        }
    }

    /// Depth-first, document-order walk over this element and all of its descendants
    pub fn iter(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    fn push_text(&mut self, data: &str) {
        // Character data after a child belongs to that child's tail, not to us
        if !self.children.is_empty() || data.is_empty() {
            return;
        }
        match &mut self.text {
            Some(text) => text.push_str(data),
            None => self.text = Some(data.to_string()),
        }
    }
}

/// Pre-order iterator returned by [`Element::iter`]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    /// Parses raw document text into an element tree
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for mismatched or unclosed tags, unbound
    /// namespace prefixes, malformed attributes or entities, a missing root
    /// element, a second root element, or non-whitespace text outside the root.
    ///
    /// # Example
    ///
    /// ```
    /// use waf_harvest::metadata::XmlDocument;
    ///
    /// let doc = XmlDocument::parse("<a><b>text</b></a>").unwrap();
    /// assert_eq!(doc.root().tag, "a");
    /// assert!(XmlDocument::parse("<a><b></a>").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = NsReader::from_str(text);
        reader.config_mut().check_end_names = true;

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| syntax_error(&reader, e.to_string()))?;

            match event {
                Event::Start(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(ParseError::MultipleRoots(position(&reader)));
                    }
                    let tag = qualified_tag(&reader, &start)?;
                    stack.push(Element::new(tag));
                }
                Event::Empty(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(ParseError::MultipleRoots(position(&reader)));
                    }
                    let element = Element::new(qualified_tag(&reader, &start)?);
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| syntax_error(&reader, "unexpected end tag".to_string()))?;
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(data) => {
                    let data = data
                        .unescape()
                        .map_err(|e| syntax_error(&reader, e.to_string()))?;
                    match stack.last_mut() {
                        Some(current) => current.push_text(&data),
                        None if data.trim().is_empty() => {}
                        None => return Err(ParseError::TextOutsideRoot(position(&reader))),
                    }
                }
                Event::CData(data) => {
                    let data = std::str::from_utf8(&data)
                        .map_err(|e| syntax_error(&reader, e.to_string()))?;
                    match stack.last_mut() {
                        Some(current) => current.push_text(data),
                        None => return Err(ParseError::TextOutsideRoot(position(&reader))),
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes carry no content
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(ParseError::UnclosedElement(open.tag));
        }

        root.map(|root| Self { root }).ok_or(ParseError::NoRoot)
    }

    /// Parses raw bytes, which must be UTF-8
    ///
    /// # Errors
    ///
    /// Invalid UTF-8 is a [`ParseError::Syntax`] positioned at the first bad
    /// byte; otherwise the same errors as [`XmlDocument::parse`].
    pub fn parse_bytes(raw: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(raw).map_err(|e| ParseError::Syntax {
            position: e.valid_up_to() as u64,
            message: format!("invalid UTF-8: {}", e),
        })?;
        Self::parse(text)
    }

    /// The document element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Every element of the document in depth-first document order
    pub fn iter(&self) -> Descendants<'_> {
        self.root.iter()
    }
}

/// Hands a completed element to its parent, or makes it the root
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// Resolves an element name to Clark notation and checks its attributes
fn qualified_tag(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<String, ParseError> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| syntax_error(reader, e.to_string()))?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attribute.key) {
            return Err(ParseError::UnboundPrefix {
                prefix: String::from_utf8_lossy(&prefix).into_owned(),
                position: position(reader),
            });
        }
    }

    let (resolved, local) = reader.resolve_element(start.name());
    let local = std::str::from_utf8(local.as_ref())
        .map_err(|e| syntax_error(reader, e.to_string()))?;

    match resolved {
        ResolveResult::Bound(namespace) => {
            let uri = std::str::from_utf8(namespace.as_ref())
                .map_err(|e| syntax_error(reader, e.to_string()))?;
            Ok(format!("{{{}}}{}", uri, local))
        }
        ResolveResult::Unbound => Ok(local.to_string()),
        ResolveResult::Unknown(prefix) => Err(ParseError::UnboundPrefix {
            prefix: String::from_utf8_lossy(&prefix).into_owned(),
            position: position(reader),
        }),
    }
}

fn position(reader: &NsReader<&[u8]>) -> u64 {
    reader.buffer_position() as u64
}

fn syntax_error(reader: &NsReader<&[u8]>, message: String) -> ParseError {
    ParseError::Syntax {
        position: position(reader),
        message,
    }
}
