use crate::error::{CrawlError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// How a resolved link is compared against the crawl's base URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkScope {
    /// Internal iff the URL string starts with the base URL string.
    ///
    /// A different host that shares the base as a prefix
    /// (`https://example.com.attacker.net`) counts as internal.
    #[default]
    Prefix,
    /// Internal iff scheme, host and port all equal the base's
    Origin,
}

/// Whether a link stays on the crawled site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Internal,
    External,
}

/// Returns `scheme://host` for a URL, dropping port, path and query
pub fn base_origin(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| CrawlError::InvalidUrl(format!("{url}: {e}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| CrawlError::InvalidUrl(format!("{url}: no host")))?;
    Ok(format!("{}://{}", parsed.scheme(), host))
}

/// Resolves a hyperlink against the base URL.
///
/// Absolute hrefs come back unchanged. Relative ones are joined onto
/// `base_url`. Returns `None` when either side is malformed.
pub fn resolve(href: &str, base_url: &str) -> Option<String> {
    match try_resolve(href, base_url) {
        Ok(resolved) => Some(resolved),
        Err(e) => {
            ::log::debug!("Skipping link: {}", e);
            None
        }
    }
}

/// Like [`resolve`], reporting why a link could not be resolved
pub fn try_resolve(href: &str, base_url: &str) -> Result<String> {
    // The URL parser ignores these, so the returned string must too
    let href = href
        .trim_matches(|c: char| c.is_ascii_control() || c == ' ')
        .replace(['\t', '\n', '\r'], "");

    if Url::parse(&href).is_ok() {
        return Ok(href);
    }

    let base = Url::parse(base_url).map_err(|e| CrawlError::MalformedUrl(format!("base {base_url}: {e}")))?;
    base.join(&href)
        .map(String::from)
        .map_err(|e| CrawlError::MalformedUrl(format!("{href}: {e}")))
}

/// Classifies an already resolved URL relative to the base URL
pub fn classify(resolved: &str, base_url: &str, scope: LinkScope) -> LinkKind {
    let internal = match scope {
        LinkScope::Prefix => resolved.starts_with(base_url),
        LinkScope::Origin => same_origin(resolved, base_url),
    };

    if internal {
        LinkKind::Internal
    } else {
        LinkKind::External
    }
}

fn same_origin(resolved: &str, base_url: &str) -> bool {
    match (Url::parse(resolved), Url::parse(base_url)) {
        (Ok(a), Ok(b)) => {
            a.scheme() == b.scheme()
                && a.host_str().is_some()
                && a.host_str() == b.host_str()
                && a.port_or_known_default() == b.port_or_known_default()
        }
        _ => false,
    }
}

/// True for hrefs that lead nowhere (`#`, `javascript:void(0)`)
pub fn is_noop_href(href: &str) -> bool {
    let href = href.trim();
    if href == "#" {
        return true;
    }

    let lowered = href.to_ascii_lowercase();
    let script = lowered.trim_end_matches(';');
    script == "javascript:void(0)" || script == "javascript:"
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com";

    #[test]
    fn test_base_origin_drops_port_and_path() {
        assert_eq!(
            base_origin("https://example.com:8443/docs/page?q=1").unwrap(),
            "https://example.com"
        );
        assert_eq!(base_origin("http://sub.example.org").unwrap(), "http://sub.example.org");
    }

    #[test]
    fn test_base_origin_rejects_hostless_urls() {
        assert!(base_origin("not a url").is_err());
        assert!(base_origin("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_resolve_root_relative() {
        assert_eq!(resolve("/about", BASE).unwrap(), "https://example.com/about");
    }

    #[test]
    fn test_resolve_relative_forms() {
        assert_eq!(resolve("./team", BASE).unwrap(), "https://example.com/team");
        assert_eq!(resolve("../up", BASE).unwrap(), "https://example.com/up");
        assert_eq!(resolve("contact", BASE).unwrap(), "https://example.com/contact");
        assert_eq!(
            resolve("//cdn.example.net/lib.js", BASE).unwrap(),
            "https://cdn.example.net/lib.js"
        );
    }

    #[test]
    fn test_resolve_absolute_is_unchanged() {
        // Not normalized: no trailing slash is added
        assert_eq!(resolve("https://other.com", BASE).unwrap(), "https://other.com");
        assert_eq!(resolve("https://other.com/x", BASE).unwrap(), "https://other.com/x");
        assert_eq!(
            resolve("mailto:hello@example.com", BASE).unwrap(),
            "mailto:hello@example.com"
        );
    }

    #[test]
    fn test_resolve_strips_surrounding_whitespace() {
        assert_eq!(
            resolve("\n  https://example.com/pricing\n", BASE).unwrap(),
            "https://example.com/pricing"
        );
        assert_eq!(resolve("  /about\t", BASE).unwrap(), "https://example.com/about");
        assert_eq!(
            resolve("https://example.com/a\nb", BASE).unwrap(),
            "https://example.com/ab"
        );
    }

    #[test]
    fn test_resolve_malformed_yields_none() {
        assert!(resolve("http://[::1", BASE).is_none());
        assert!(resolve("/about", "not a base").is_none());
        assert!(matches!(
            try_resolve("http://[::1", BASE),
            Err(CrawlError::MalformedUrl(_))
        ));
    }

    #[test]
    fn test_classify_prefix() {
        assert_eq!(
            classify("https://example.com/about", BASE, LinkScope::Prefix),
            LinkKind::Internal
        );
        assert_eq!(
            classify("https://other.com/x", BASE, LinkScope::Prefix),
            LinkKind::External
        );
        assert_eq!(
            classify("http://example.com/about", BASE, LinkScope::Prefix),
            LinkKind::External
        );
    }

    #[test]
    fn test_prefix_scope_accepts_lookalike_hosts() {
        assert_eq!(
            classify("https://example.com.attacker.net/", BASE, LinkScope::Prefix),
            LinkKind::Internal
        );
    }

    #[test]
    fn test_origin_scope_rejects_lookalike_hosts() {
        assert_eq!(
            classify("https://example.com.attacker.net/", BASE, LinkScope::Origin),
            LinkKind::External
        );
        assert_eq!(
            classify("https://example.com/about", BASE, LinkScope::Origin),
            LinkKind::Internal
        );
        assert_eq!(
            classify("https://example.com:8443/about", BASE, LinkScope::Origin),
            LinkKind::External
        );
        assert_eq!(
            classify("mailto:a@example.com", BASE, LinkScope::Origin),
            LinkKind::External
        );
    }

    #[test]
    fn test_noop_hrefs() {
        assert!(is_noop_href("#"));
        assert!(is_noop_href("javascript:void(0)"));
        assert!(is_noop_href("JavaScript:void(0);"));
        assert!(is_noop_href("javascript:;"));
        assert!(!is_noop_href("#section"));
        assert!(!is_noop_href("/about"));
    }
}
