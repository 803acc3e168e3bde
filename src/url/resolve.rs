use crate::UrlError;
use url::Url;

/// Parses and canonicalizes a catalog origin
///
/// Only the scheme, host and port are kept, so `https://Shop.example.com/`
/// becomes `https://shop.example.com`.
///
/// # Arguments
///
/// * `origin` - The origin string from configuration
///
/// # Returns
///
/// * `Ok(String)` - The serialized origin without a trailing slash
/// * `Err(UrlError)` - The origin is not an absolute HTTP(S) URL
///
/// # Examples
///
/// ```
/// use swatch_ripple::url::parse_origin;
///
/// let origin = parse_origin("https://Shop.Example.com/").unwrap();
/// assert_eq!(origin, "https://shop.example.com");
/// ```
pub fn parse_origin(origin: &str) -> Result<String, UrlError> {
    let url = Url::parse(origin.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::Parse(format!("Missing host in origin '{}'", origin)));
    }

    Ok(url.origin().ascii_serialization())
}

/// Builds an absolute URL by prefixing the origin to a page-relative path
///
/// # Examples
///
/// ```
/// use swatch_ripple::url::join_origin;
///
/// assert_eq!(
///     join_origin("https://shop.example.com", "/products/range"),
///     "https://shop.example.com/products/range"
/// );
/// ```
pub fn join_origin(origin: &str, path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if path.is_empty() || path.starts_with('/') {
        format!("{}{}", origin, path)
    } else {
        format!("{}/{}", origin, path)
    }
}

/// Reduces a start or swatch URL to the page-relative form used by the frontier
///
/// Paths beginning with a single `/` are returned unchanged. Absolute or
/// protocol-relative URLs must belong to `origin` and are reduced to their
/// path and query. Bare relative paths resolve against the origin root.
///
/// # Arguments
///
/// * `origin` - Canonical origin (see [`parse_origin`])
/// * `url` - The URL as found in configuration or on a page
///
/// # Returns
///
/// * `Ok(String)` - The page-relative path
/// * `Err(UrlError)` - The URL is empty, malformed, or on another origin
pub fn page_path(origin: &str, url: &str) -> Result<String, UrlError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlError::Parse("empty URL".to_string()));
    }

    if url.starts_with('/') && !url.starts_with("//") {
        return Ok(url.to_string());
    }

    let base = Url::parse(origin).map_err(|e| UrlError::Parse(e.to_string()))?;
    let resolved = base
        .join(url)
        .map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;

    if resolved.origin() != base.origin() {
        return Err(UrlError::ForeignOrigin {
            url: url.to_string(),
            origin: origin.to_string(),
        });
    }

    Ok(match resolved.query() {
        Some(query) => format!("{}?{}", resolved.path(), query),
        None => resolved.path().to_string(),
    })
}
