use crate::UrlError;
use url::Url;

/// Resolves a link reference against the catalog base address
///
/// The base is treated as a directory: it gets exactly one trailing slash and
/// the reference is resolved against it with URL-join rules. Relative
/// references land under the base, root-relative ones under the host, and
/// absolute ones are returned unchanged.
///
/// # Examples
///
/// ```
/// use waf_harvest::url::{join_link, normalize_base};
///
/// let base = normalize_base("https://example.com/erddap/metadata/iso19115/xml/").unwrap();
/// let url = join_link(&base, "sst_iso19115.xml").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://example.com/erddap/metadata/iso19115/xml/sst_iso19115.xml"
/// );
/// ```
pub fn join_link(base: &Url, href: &str) -> Result<Url, UrlError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(UrlError::EmptyReference);
    }

    let mut directory = base.clone();
    if !directory.path().ends_with('/') {
        let path = format!("{}/", directory.path());
        directory.set_path(&path);
    }

    directory
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))
}

/// Returns the local file name for a link reference
///
/// This is the final `/`-separated segment, so directory components and any
/// scheme or host of an absolute reference are dropped.
pub fn local_file_name(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}
