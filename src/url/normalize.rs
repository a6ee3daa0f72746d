use crate::UrlError;
use url::Url;

/// Normalizes the base URL given on the command line
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Strip one trailing slash
/// 3. Parse the result; reject if malformed, not HTTP(S) or host-less
///
/// The returned string is the text form used for fetching and for the
/// "is the base URL already in the link list" check. It is deliberately not
/// the parsed `Url` serialization, which would re-add a root slash.
///
/// # Examples
///
/// ```
/// use doc_scraper::url::normalize_base_url;
///
/// let (base, url) = normalize_base_url("https://docs.example.com/").unwrap();
/// assert_eq!(base, "https://docs.example.com");
/// assert_eq!(url.host_str(), Some("docs.example.com"));
/// ```
pub fn normalize_base_url(raw: &str) -> Result<(String, Url), UrlError> {
    let trimmed = raw.trim();
    let base = trimmed.strip_suffix('/').unwrap_or(trimmed).to_string();

    let url = Url::parse(&base).map_err(|e| UrlError::Parse(format!("{}: {}", base, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(base));
    }

    Ok((base, url))
}

/// Canonicalizes a resolved link by clearing its query string and fragment
///
/// The path is left untouched: two links that differ only by a trailing
/// slash stay distinct.
///
/// # Examples
///
/// ```
/// use doc_scraper::url::canonicalize_url;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/guide/?tab=1#install").unwrap();
/// assert_eq!(canonicalize_url(url).as_str(), "https://example.com/guide/");
/// ```
pub fn canonicalize_url(mut url: Url) -> Url {
    url.set_query(None);
    url.set_fragment(None);
    url
}
