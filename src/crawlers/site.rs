use crate::backend::{self, BrowserBackend};
use crate::config::CrawlerConfig;
use crate::error::{ConfigError, CrawlError, Result};
use crate::filter::FollowFilter;
use crate::parsers::{self, ExtractOptions};
use crate::resolver;
use crate::results::{CrawlResult, PageRecord};
use std::collections::HashSet;
use std::future::Future;
use url::Url;

/// Bounded depth-first crawler for a single site
pub struct Crawler {
    config: CrawlerConfig,
    filter: FollowFilter,
}

impl Crawler {
    /// Create a crawler, compiling the configured follow patterns
    pub fn new(config: CrawlerConfig) -> std::result::Result<Self, ConfigError> {
        let filter = config.follow_filter()?;
        Ok(Self { config, filter })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawl a site starting at `start_url` with a freshly initialized backend.
    ///
    /// Never fails: page-level problems are recorded on the pages, and a crawl
    /// that cannot start comes back with `status: "error"`.
    pub async fn crawl(&self, start_url: &str) -> CrawlResult {
        self.crawl_with(start_url, backend::initialize(&self.config.backend))
            .await
    }

    /// Crawl using the backend produced by `launch`.
    ///
    /// `launch` is only awaited once the start URL is known to be usable. The
    /// backend it yields is disposed before this returns.
    pub async fn crawl_with<F>(&self, start_url: &str, launch: F) -> CrawlResult
    where
        F: Future<Output = Result<Box<dyn BrowserBackend>>>,
    {
        let (start_url, base_url) = match prepare_start(start_url) {
            Ok(prepared) => prepared,
            Err(e) => {
                ::log::error!("Crawling error: {}", e);
                return CrawlResult::failure(e.to_string());
            }
        };

        let mut backend = match launch.await {
            Ok(backend) => backend,
            Err(e) => {
                ::log::error!("Crawling error: {}", e);
                return CrawlResult::failure(e.to_string());
            }
        };

        ::log::info!(
            "Starting crawl of {} (base {}) with {} backend",
            start_url,
            base_url,
            backend.name()
        );

        let mut traversal = Traversal::new(&self.config, &self.filter, &base_url);
        traversal.run(backend.as_mut(), start_url).await;

        if let Err(e) = backend.dispose().await {
            ::log::warn!("Failed to dispose {} backend: {}", backend.name(), e);
        }

        let pages = traversal.pages;
        ::log::info!("Crawl of {} finished with {} pages", base_url, pages.len());
        CrawlResult::success(base_url, pages)
    }
}

/// Canonical start URL and its `scheme://host` origin
fn prepare_start(start_url: &str) -> Result<(String, String)> {
    let parsed = Url::parse(start_url).map_err(|e| CrawlError::InvalidUrl(format!("{start_url}: {e}")))?;
    let base_url = resolver::base_origin(parsed.as_str())?;
    Ok((parsed.to_string(), base_url))
}

/// State of one crawl: what was visited and what was produced
struct Traversal<'a> {
    config: &'a CrawlerConfig,
    filter: &'a FollowFilter,
    options: ExtractOptions,
    base_url: &'a str,
    visited: HashSet<String>,
    pages: Vec<PageRecord>,
}

impl<'a> Traversal<'a> {
    fn new(config: &'a CrawlerConfig, filter: &'a FollowFilter, base_url: &'a str) -> Self {
        Self {
            config,
            filter,
            options: config.extract_options(),
            base_url,
            visited: HashSet::new(),
            pages: Vec::new(),
        }
    }

    /// Walks the site in pre-order using an explicit stack of `(url, depth)`
    async fn run(&mut self, backend: &mut dyn BrowserBackend, start_url: String) {
        let mut stack = vec![(start_url, 0)];

        while let Some((url, depth)) = stack.pop() {
            if !self.should_visit(&url, depth) {
                continue;
            }
            self.visited.insert(url.clone());

            ::log::info!(
                "Crawling: {} (depth: {}, page: {})",
                url,
                depth,
                self.pages.len() + 1
            );

            let page = match render(backend, &url).await {
                Ok(html) => parsers::extract(&url, &html, self.base_url, &self.options),
                Err(e) => {
                    ::log::warn!("Error crawling {}: {}", url, e);
                    PageRecord::failed(&url, e.to_string())
                }
            };

            let children = if page.is_error() {
                Vec::new()
            } else {
                self.follow_candidates(&page, depth)
            };
            self.pages.push(page);

            // Reversed so the first link is popped first
            stack.extend(children.into_iter().rev());
        }
    }

    fn should_visit(&self, url: &str, depth: usize) -> bool {
        depth <= self.config.max_depth
            && self.pages.len() < self.config.max_pages
            && !self.visited.contains(url)
    }

    /// The internal links of `page` worth pushing onto the stack
    fn follow_candidates(&self, page: &PageRecord, depth: usize) -> Vec<(String, usize)> {
        if depth >= self.config.max_depth || self.pages.len() >= self.config.max_pages {
            return Vec::new();
        }

        page.links
            .internal
            .iter()
            .take(self.config.max_links_per_page)
            .filter_map(|link| {
                let Some(url) = resolver::resolve(link, self.base_url) else {
                    ::log::debug!("Skipping unresolvable link: {}", link);
                    return None;
                };
                if self.visited.contains(&url) {
                    ::log::debug!("Skipping already visited link: {}", url);
                    return None;
                }
                if !self.filter.should_follow(&url) {
                    ::log::debug!("Follow filter rejected: {}", url);
                    return None;
                }
                Some((url, depth + 1))
            })
            .collect()
    }
}

async fn render(backend: &mut dyn BrowserBackend, url: &str) -> Result<String> {
    backend.navigate(url).await?;
    backend.page_source().await
}
