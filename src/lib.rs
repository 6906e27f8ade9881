// Re-export modules
pub mod backend;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod resolver;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use backend::BrowserBackend;
pub use config::{BackendConfig, CrawlerConfig};
pub use crawlers::Crawler;
pub use error::{ConfigError, CrawlError};
pub use results::{CrawlResult, CrawlStatus, PageRecord};

use std::path::Path;

/// Builder for a single-site crawl
pub struct SiteCrawl {
    start_url: String,
    config: CrawlerConfig,
}

impl SiteCrawl {
    /// Create a crawl of the given start URL with default settings
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            config: CrawlerConfig::default(),
        }
    }

    /// Set the maximum number of pages to produce
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the deepest link-follow hop allowed
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the per-page navigation timeout
    pub fn with_page_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.backend.page_timeout_secs = timeout_seconds;
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CrawlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = CrawlerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, ConfigError> {
        let config = CrawlerConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Run the crawl to completion
    pub async fn run(self) -> Result<CrawlResult, ConfigError> {
        let crawler = Crawler::new(self.config)?;
        Ok(crawler.crawl(&self.start_url).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let crawl = SiteCrawl::new("https://example.com")
            .with_max_pages(5)
            .with_max_depth(2)
            .with_page_timeout(10);

        assert_eq!(crawl.config().max_pages, 5);
        assert_eq!(crawl.config().max_depth, 2);
        assert_eq!(crawl.config().backend.page_timeout_secs, 10);
    }

    #[test]
    fn test_builder_config_str() {
        let crawl = SiteCrawl::new("https://example.com")
            .with_config_str(r#"{"maxPages": 3}"#)
            .unwrap();
        assert_eq!(crawl.config().max_pages, 3);
        assert_eq!(crawl.config().max_depth, 1);
    }
}
