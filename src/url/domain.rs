use url::Url;

/// Extracts the domain a URL counts against for crawl health
///
/// The host is lowercased and a trailing root dot is dropped, so
/// `https://Example.COM./a` and `https://example.com/b` share one domain.
/// Ports are ignored. URLs without a host (`mailto:`, `data:`) have no domain.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use cinecrawl::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_end_matches('.');
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

/// Parses `url` and extracts its domain
///
/// Returns `None` for strings that are not absolute URLs.
pub fn domain_of(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(extract_domain)
}
