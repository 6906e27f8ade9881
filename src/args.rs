use clap::{Parser, ValueEnum};
use pagewalk::CrawlerConfig;
use pagewalk::resolver::LinkScope;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pagewalk")]
#[command(about = "Renders a site in a headless browser and prints structured page data as JSON")]
#[command(version)]
pub struct Args {
    /// Site to crawl; https:// is assumed when no scheme is given
    pub url: String,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of pages to crawl
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Maximum link-follow depth (start page is depth 0)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Per-page navigation timeout in seconds
    #[arg(long)]
    pub page_timeout: Option<u64>,

    /// Wait after page load in milliseconds
    #[arg(long)]
    pub settle_delay: Option<u64>,

    /// Cap on stored HTML per page in bytes
    #[arg(long, conflicts_with = "no_html_cap")]
    pub max_html_size: Option<usize>,

    /// Keep full page HTML regardless of size
    #[arg(long)]
    pub no_html_cap: bool,

    /// WebDriver endpoint (overrides WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Do not launch Chrome directly when no WebDriver is reachable
    #[arg(long)]
    pub no_fallback: bool,

    /// How links are split into internal and external
    #[arg(long, value_enum)]
    pub link_scope: Option<LinkScopeArg>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pub pretty: bool,
}

/// Command-line spelling of [`LinkScope`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LinkScopeArg {
    /// Internal when the URL starts with the site's base URL
    Prefix,
    /// Internal when scheme, host and port match the site's
    Origin,
}

impl From<LinkScopeArg> for LinkScope {
    fn from(arg: LinkScopeArg) -> Self {
        match arg {
            LinkScopeArg::Prefix => LinkScope::Prefix,
            LinkScopeArg::Origin => LinkScope::Origin,
        }
    }
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut CrawlerConfig) {
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(secs) = self.page_timeout {
            config.backend.page_timeout_secs = secs;
        }
        if let Some(ms) = self.settle_delay {
            config.backend.settle_delay_ms = ms;
        }
        if self.no_html_cap {
            config.max_html_size = None;
        } else if let Some(cap) = self.max_html_size {
            config.max_html_size = Some(cap);
        }
        if let Some(url) = &self.webdriver_url {
            config.backend.webdriver_url = url.clone();
        }
        if self.no_fallback {
            config.backend.fallback = false;
        }
        if let Some(scope) = self.link_scope {
            config.link_scope = scope.into();
        }
    }
}
