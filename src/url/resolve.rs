use url::Url;

/// Resolves a link href against a base URL
///
/// Returns None if the link cannot point at a document:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: links
/// - links that do not resolve to an http(s) URL
///
/// The fragment of the resolved URL is dropped.
///
/// # Examples
///
/// ```
/// use acts_harvester::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://www.cbr.ru/na/").unwrap();
/// let url = resolve_href(&base, "/Queries/UniDbQuery/File/90134/1#top").unwrap();
/// assert_eq!(url.as_str(), "https://www.cbr.ru/Queries/UniDbQuery/File/90134/1");
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}

/// Returns the href with its query string removed
///
/// The load-more control embeds the query of the *next* page; the paged
/// listing requests supply their own parameters instead.
pub fn strip_query(href: &str) -> &str {
    match href.split_once('?') {
        Some((path, _)) => path,
        None => href,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/na/").unwrap()
    }

    #[test]
    fn test_resolve_absolute_link() {
        let url = resolve_href(&base_url(), "https://other.com/doc").unwrap();
        assert_eq!(url.as_str(), "https://other.com/doc");
    }

    #[test]
    fn test_resolve_root_relative_link() {
        let url = resolve_href(&base_url(), "/acts/1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/acts/1");
    }

    #[test]
    fn test_resolve_path_relative_link() {
        let url = resolve_href(&base_url(), "doc?id=5").unwrap();
        assert_eq!(url.as_str(), "https://example.com/na/doc?id=5");
    }

    #[test]
    fn test_skip_non_document_links() {
        assert!(resolve_href(&base_url(), "").is_none());
        assert!(resolve_href(&base_url(), "   ").is_none());
        assert!(resolve_href(&base_url(), "#section").is_none());
        assert!(resolve_href(&base_url(), "javascript:void(0)").is_none());
        assert!(resolve_href(&base_url(), "mailto:test@example.com").is_none());
        assert!(resolve_href(&base_url(), "ftp://example.com/file").is_none());
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(
            strip_query("/na/LoadMore?Page=1&Date.Time=Any"),
            "/na/LoadMore"
        );
        assert_eq!(strip_query("/na/LoadMore"), "/na/LoadMore");
        assert_eq!(strip_query("?Page=1"), "");
    }
}
