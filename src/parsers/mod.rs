pub mod html;

#[cfg(test)]
mod tests;

use crate::config::CrawlerConfig;
use crate::resolver::LinkScope;
use crate::results::PageRecord;

/// Knobs for turning rendered HTML into a `PageRecord`
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Maximum number of clickable elements recorded
    pub max_buttons: usize,
    /// Byte cap for the stored HTML, `None` for no cap
    pub max_html_size: Option<usize>,
    /// Rule used to split links into internal and external
    pub link_scope: LinkScope,
}

impl Default for ExtractOptions {
    /// Same limits a crawl uses with the default configuration
    fn default() -> Self {
        CrawlerConfig::default().extract_options()
    }
}

/// Extract a page record from rendered HTML.
///
/// Pure function of its inputs; malformed markup produces empty fields rather
/// than an error.
pub fn extract(url: &str, html: &str, base_url: &str, options: &ExtractOptions) -> PageRecord {
    html::extract(url, html, base_url, options)
}
