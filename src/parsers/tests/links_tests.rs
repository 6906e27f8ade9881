use crate::parsers::{ExtractOptions, extract};
use crate::resolver::LinkScope;

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com";

    fn links_of(body: &str, scope: LinkScope) -> crate::results::Links {
        let html = format!("<html><body>{body}</body></html>");
        let options = ExtractOptions {
            link_scope: scope,
            ..ExtractOptions::default()
        };
        extract("https://example.com/", &html, BASE, &options).links
    }

    #[test]
    fn test_root_relative_link_is_internal() {
        let links = links_of(r#"<a href="/about">About</a>"#, LinkScope::Prefix);
        assert_eq!(links.internal, vec!["https://example.com/about"]);
        assert!(links.external.is_empty());
    }

    #[test]
    fn test_other_host_is_external() {
        let links = links_of(r#"<a href="https://other.com/x">x</a>"#, LinkScope::Prefix);
        assert!(links.internal.is_empty());
        assert_eq!(links.external, vec!["https://other.com/x"]);
    }

    #[test]
    fn test_noop_links_are_ignored() {
        let links = links_of(
            r##"<a href="#">Top</a><a href="javascript:void(0)">Menu</a><a href="">Empty</a>"##,
            LinkScope::Prefix,
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_links_are_deduplicated_and_ordered() {
        let links = links_of(
            r#"
            <a href="/b">b</a>
            <a href="/a">a</a>
            <a href="https://example.com/b">b again</a>
            <a href="./a">a again</a>
            <a href="https://other.com">o</a>
            <a href="https://other.com">o again</a>
            "#,
            LinkScope::Prefix,
        );
        assert_eq!(
            links.internal,
            vec!["https://example.com/b", "https://example.com/a"]
        );
        assert_eq!(links.external, vec!["https://other.com"]);
    }

    #[test]
    fn test_padded_absolute_href_is_trimmed_and_internal() {
        let links = links_of(
            "<a href=\"\n  https://example.com/pricing\n\">Pricing</a>",
            LinkScope::Prefix,
        );
        assert_eq!(links.internal, vec!["https://example.com/pricing"]);
        assert!(links.external.is_empty());
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let links = links_of(r#"<a name="top">Top</a>"#, LinkScope::Prefix);
        assert!(links.is_empty());
    }

    #[test]
    fn test_scope_decides_lookalike_hosts() {
        let body = r#"<a href="https://example.com.attacker.net/login">login</a>"#;

        let prefix = links_of(body, LinkScope::Prefix);
        assert_eq!(prefix.internal, vec!["https://example.com.attacker.net/login"]);

        let origin = links_of(body, LinkScope::Origin);
        assert!(origin.internal.is_empty());
        assert_eq!(origin.external, vec!["https://example.com.attacker.net/login"]);
    }

    #[test]
    fn test_internal_and_external_are_disjoint() {
        let links = links_of(
            r#"<a href="/x">x</a><a href="mailto:team@example.com">mail</a><a href="/x">x</a>"#,
            LinkScope::Prefix,
        );
        for url in &links.internal {
            assert!(!links.external.contains(url));
        }
        assert_eq!(links.external, vec!["mailto:team@example.com"]);
    }
}
