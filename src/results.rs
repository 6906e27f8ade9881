use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Document-level metadata pulled from `<title>` and `<meta>` tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// A clickable element found on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Visible label (text, value or title attribute)
    pub text: String,
    /// Target of the element, empty for elements without an href
    pub href: String,
}

/// Resolved links of a page, split by whether they stay on the crawled site.
///
/// Both lists are duplicate-free and keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

impl Links {
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}

/// Builds [`Links`] in document order, keeping only the first sighting of a URL
#[derive(Debug, Default)]
pub struct LinkCollector {
    seen: HashSet<String>,
    links: Links,
}

impl LinkCollector {
    /// Records an internal link unless the URL was already seen
    pub fn push_internal(&mut self, url: String) {
        if self.seen.insert(url.clone()) {
            self.links.internal.push(url);
        }
    }

    /// Records an external link unless the URL was already seen
    pub fn push_external(&mut self, url: String) {
        if self.seen.insert(url.clone()) {
            self.links.external.push(url);
        }
    }

    pub fn finish(self) -> Links {
        self.links
    }
}

/// Extraction result for a single visited URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// The URL that was visited
    pub url: String,

    /// Rendered page source, possibly truncated
    pub html: String,

    pub metadata: PageMetadata,

    /// Heading texts keyed by level tag (`h1`..`h6`), empty levels omitted
    pub headers: BTreeMap<String, Vec<String>>,

    pub buttons: Vec<Button>,

    pub links: Links,

    /// Length in bytes of the rendered source before truncation
    pub html_size: usize,

    pub truncated: bool,

    /// Set when rendering this URL failed
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl PageRecord {
    /// Creates the record for a URL that could not be rendered
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Overall outcome of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    Success,
    Error,
}

/// Aggregate result of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    pub status: CrawlStatus,

    /// Visited pages in pre-order depth-first order
    pub pages: Vec<PageRecord>,

    pub total_pages: usize,

    /// `scheme://host` of the start URL
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl CrawlResult {
    pub fn success(base_url: String, pages: Vec<PageRecord>) -> Self {
        Self {
            status: CrawlStatus::Success,
            total_pages: pages.len(),
            pages,
            base_url: Some(base_url),
            error: None,
        }
    }

    /// A crawl that could not start; carries no pages
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: CrawlStatus::Error,
            pages: Vec::new(),
            total_pages: 0,
            base_url: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CrawlStatus::Success
    }
}
