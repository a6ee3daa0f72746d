use url::Url;

/// Checks whether two URLs share the same network location (`host[:port]`)
///
/// Default ports are elided by URL parsing, so `https://a.com` and
/// `https://a.com:443` match.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_scraper::url::same_netloc;
///
/// let a = Url::parse("https://Docs.Example.com/intro").unwrap();
/// let b = Url::parse("https://docs.example.com:443/setup").unwrap();
/// assert!(same_netloc(&a, &b));
/// ```
pub fn same_netloc(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}

/// Derives the label used in output file names
///
/// This is the host with a leading `www.` removed.
pub fn domain_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}
