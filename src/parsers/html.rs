use crate::parsers::ExtractOptions;
use crate::resolver::{self, LinkKind};
use crate::results::{Button, LinkCollector, Links, PageMetadata, PageRecord};
use crate::utils::truncate_html;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[name="description"]"#));
static KEYWORDS: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[name="keywords"]"#));
static CLICKABLE: LazyLock<Selector> = LazyLock::new(|| {
    selector(r#"button, a[href], input[type="button"], input[type="submit"]"#)
});
static ANCHORS: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static HEADINGS: LazyLock<Vec<(String, Selector)>> = LazyLock::new(|| {
    (1..=6)
        .map(|level| {
            let tag = format!("h{level}");
            let sel = selector(&tag);
            (tag, sel)
        })
        .collect()
});

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Parses rendered HTML into a page record
pub fn extract(url: &str, html: &str, base_url: &str, options: &ExtractOptions) -> PageRecord {
    let doc = Html::parse_document(html);

    let metadata = extract_metadata(&doc);
    let headers = extract_headers(&doc);
    let buttons = extract_buttons(&doc, options.max_buttons);
    let links = extract_links(&doc, base_url, options);

    ::log::debug!(
        "Extracted {} headings, {} buttons, {} internal / {} external links from {}",
        headers.values().map(Vec::len).sum::<usize>(),
        buttons.len(),
        links.internal.len(),
        links.external.len(),
        url
    );

    let html_size = html.len();
    let (html, truncated) = match options.max_html_size {
        Some(cap) => truncate_html(html, cap),
        None => (html.to_string(), false),
    };
    if truncated {
        ::log::info!("Truncated HTML of {} ({} bytes)", url, html_size);
    }

    PageRecord {
        url: url.to_string(),
        html,
        metadata,
        headers,
        buttons,
        links,
        html_size,
        truncated,
        error: None,
    }
}

/// Reads the title and the description/keywords meta tags
pub fn extract_metadata(doc: &Html) -> PageMetadata {
    let title = doc
        .select(&TITLE)
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_default();

    PageMetadata {
        title,
        description: meta_content(doc, &DESCRIPTION),
        keywords: meta_content(doc, &KEYWORDS),
    }
}

fn meta_content(doc: &Html, sel: &Selector) -> String {
    doc.select(sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

/// Collects heading texts per level, omitting levels without headings
pub fn extract_headers(doc: &Html) -> BTreeMap<String, Vec<String>> {
    let mut headers = BTreeMap::new();
    for (tag, sel) in HEADINGS.iter() {
        let texts: Vec<String> = doc.select(sel).map(|el| element_text(&el)).collect();
        if !texts.is_empty() {
            headers.insert(tag.clone(), texts);
        }
    }
    headers
}

/// Collects labelled clickable elements in document order
pub fn extract_buttons(doc: &Html, max_buttons: usize) -> Vec<Button> {
    doc.select(&CLICKABLE)
        .filter_map(|el| {
            let text = clickable_label(&el)?;
            let href = el.value().attr("href").unwrap_or_default().to_string();
            Some(Button { text, href })
        })
        .take(max_buttons)
        .collect()
}

/// Visible text, else the `value` attribute, else the `title` attribute
fn clickable_label(el: &ElementRef) -> Option<String> {
    let text = element_text(el);
    if !text.is_empty() {
        return Some(text);
    }

    ["value", "title"]
        .iter()
        .filter_map(|attr| el.value().attr(attr))
        .find(|label| !label.is_empty())
        .map(str::to_string)
}

/// Resolves and classifies every anchor on the page
pub fn extract_links(doc: &Html, base_url: &str, options: &ExtractOptions) -> Links {
    let mut links = LinkCollector::default();

    for el in doc.select(&ANCHORS) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if href.is_empty() || resolver::is_noop_href(href) {
            continue;
        }

        let Some(resolved) = resolver::resolve(href, base_url) else {
            continue;
        };

        match resolver::classify(&resolved, base_url, options.link_scope) {
            LinkKind::Internal => links.push_internal(resolved),
            LinkKind::External => links.push_external(resolved),
        }
    }

    links.finish()
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
