use crate::UrlError;
use url::Url;

/// Normalizes the catalog base address given on the command line
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Strip every trailing slash
/// 3. Parse the URL; reject if malformed
/// 4. Require an HTTP or HTTPS scheme and a host
///
/// The result is the address the index page is requested from, and the base
/// every discovered link is joined against.
///
/// # Arguments
///
/// * `base` - The base address as typed by the operator
///
/// # Returns
///
/// * `Ok(Url)` - Normalized base address
/// * `Err(UrlError)` - Failed to parse or the scheme is unsupported
///
/// # Examples
///
/// ```
/// use waf_harvest::url::normalize_base;
///
/// let url = normalize_base("https://erddap.example.org/erddap/metadata/iso19115/xml/").unwrap();
/// assert_eq!(url.as_str(), "https://erddap.example.org/erddap/metadata/iso19115/xml");
/// ```
pub fn normalize_base(base: &str) -> Result<Url, UrlError> {
    let trimmed = base.trim().trim_end_matches('/');

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(format!("{}: {}", base, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::Parse(format!("{}: missing host", base)));
    }

    Ok(url)
}
