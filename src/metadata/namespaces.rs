//! Fixed ISO 19115/19139 namespace table and the targeted field path

/// Prefix to namespace URI bindings used by ISO 19139 metadata records
pub static NAMESPACES: &[(&str, &str)] = &[
    ("gmd", "http://www.isotc211.org/2005/gmd"),
    ("gco", "http://www.isotc211.org/2005/gco"),
    ("gmi", "http://www.isotc211.org/2005/gmi"),
    ("gml", "http://www.opengis.net/gml/3.2"),
];

/// Looks up the URI bound to a prefix in [`NAMESPACES`]
pub fn namespace_uri(prefix: &str) -> Option<&'static str> {
    NAMESPACES
        .iter()
        .find(|(known, _)| *known == prefix)
        .map(|(_, uri)| *uri)
}

/// A `prefix:local` element name resolved through [`NAMESPACES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName {
    pub prefix: &'static str,
    pub local: &'static str,
}

impl QualifiedName {
    pub const fn new(prefix: &'static str, local: &'static str) -> Self {
        Self { prefix, local }
    }

    /// Returns true if `tag` (in Clark notation) names this element
    pub fn matches(&self, tag: &str) -> bool {
        let Some(uri) = namespace_uri(self.prefix) else {
            return false;
        };
        tag.strip_prefix('{')
            .and_then(|rest| rest.strip_prefix(uri))
            .and_then(|rest| rest.strip_prefix('}'))
            .is_some_and(|local| local == self.local)
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

/// One step of a [`BAND_NAME_PATH`]-style path
///
/// The step matches a child named `name`, or a grandchild named `name` whose
/// parent is the optional `via` wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub name: QualifiedName,
    pub via: Option<QualifiedName>,
}

impl PathStep {
    pub const fn child(name: QualifiedName) -> Self {
        Self { name, via: None }
    }

    pub const fn via(wrapper: QualifiedName, name: QualifiedName) -> Self {
        Self {
            name,
            via: Some(wrapper),
        }
    }
}

impl std::fmt::Display for PathStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.via {
            Some(wrapper) => write!(f, "[{}/]{}", wrapper, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Band names of a coverage description
///
/// Five levels: coverage description, band, sequence identifier, member name
/// and character string. The first step matches at any depth below the root.
/// ISO 19139 wraps the band in `gmd:dimension` and the name string in
/// `gco:aName`; either wrapper may be present or absent.
pub static BAND_NAME_PATH: &[PathStep] = &[
    PathStep::child(QualifiedName::new("gmi", "MI_CoverageDescription")),
    PathStep::via(
        QualifiedName::new("gmd", "dimension"),
        QualifiedName::new("gmd", "MD_Band"),
    ),
    PathStep::child(QualifiedName::new("gmd", "sequenceIdentifier")),
    PathStep::child(QualifiedName::new("gco", "MemberName")),
    PathStep::via(
        QualifiedName::new("gco", "aName"),
        QualifiedName::new("gco", "CharacterString"),
    ),
];

/// Renders a path in the `.//a:b/[w:x/]c:d` form used in log lines
pub fn describe_path(path: &[PathStep]) -> String {
    let steps: Vec<String> = path.iter().map(ToString::to_string).collect();
    format!(".//{}", steps.join("/"))
}
