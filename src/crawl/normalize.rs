// src/crawl/normalize.rs
// =============================================================================
// Turns raw href/src attribute values into absolute URLs.
//
// Rules, applied in order:
// 1. "//host/path"  -> "https://host/path"   (protocol-relative)
// 2. "/path"        -> resolved against the page's scheme + host
// 3. "http:..." / "https:..." -> taken as is
// 4. anything else  -> rejected (mailto:, javascript:, "#top", "img/a.png")
//
// Rule 4 means same-page-relative paths ("photo.png", "../a") are never
// followed or downloaded. Fragments and query strings are kept, so
// "https://a.com/x#one" and "https://a.com/x#two" are different pages.
// =============================================================================

use url::Url;

use crate::errors::CrawlError;

// Resolves a reference found on `base` into an absolute http(s) URL
//
// Parameters:
//   base: the URL of the page the reference was found on
//   reference: the raw attribute value
//
// Returns: Ok(absolute_url) or Err(CrawlError::InvalidReference)
pub fn normalize(base: &Url, reference: &str) -> Result<Url, CrawlError> {
    let invalid = || CrawlError::InvalidReference {
        reference: reference.to_string(),
    };

    let resolved = if reference.starts_with("//") {
        Url::parse(&format!("https:{reference}"))
    } else if reference.starts_with('/') {
        base.join(reference)
    } else if reference.starts_with("http:") || reference.starts_with("https:") {
        Url::parse(reference)
    } else {
        return Err(invalid());
    };

    resolved.map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/a/b").unwrap()
    }

    #[test]
    fn test_protocol_relative_gets_https() {
        let url = normalize(&base(), "//cdn.example.org/x.png").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.org/x.png");
    }

    #[test]
    fn test_root_relative_uses_page_host() {
        let url = normalize(&base(), "/img/photo.png").unwrap();
        assert_eq!(url.as_str(), "https://example.com/img/photo.png");
    }

    #[test]
    fn test_root_relative_keeps_page_scheme() {
        let base = Url::parse("http://127.0.0.1:8080/deep/page").unwrap();
        let url = normalize(&base, "/docs").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/docs");
    }

    #[test]
    fn test_absolute_passes_through() {
        let url = normalize(&base(), "http://other.com/page?q=1#frag").unwrap();
        assert_eq!(url.as_str(), "http://other.com/page?q=1#frag");
    }

    #[test]
    fn test_fragments_are_not_stripped() {
        let one = normalize(&base(), "https://example.com/x#one").unwrap();
        let two = normalize(&base(), "https://example.com/x#two").unwrap();
        assert_ne!(one, two);
    }

    #[test]
    fn test_rejects_other_schemes_and_relative_paths() {
        for reference in [
            "mailto:test@example.com",
            "javascript:void(0)",
            "#section",
            "photo.png",
            "../up",
            "",
            "ftp://example.com/file",
        ] {
            assert!(
                matches!(
                    normalize(&base(), reference),
                    Err(CrawlError::InvalidReference { .. })
                ),
                "{reference} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_unparseable_absolute() {
        assert!(normalize(&base(), "http://").is_err());
    }
}
