use crate::error::ConfigError;
use crate::filter::FollowFilter;
use crate::parsers::ExtractOptions;
use crate::resolver::LinkScope;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a single-site crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    /// Maximum number of pages a crawl may produce
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Deepest link-follow hop allowed; the start URL is depth 0
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// How many internal links of each page are considered for following
    #[serde(default = "default_max_links_per_page")]
    pub max_links_per_page: usize,

    /// Maximum number of clickable elements recorded per page
    #[serde(default = "default_max_buttons")]
    pub max_buttons: usize,

    /// Byte cap for stored HTML; `null` keeps pages whole
    #[serde(default = "default_max_html_size")]
    pub max_html_size: Option<usize>,

    /// Rule used to split links into internal and external
    #[serde(default)]
    pub link_scope: LinkScope,

    /// Regex patterns an internal link must match to be followed
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for internal links that are never followed
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    #[serde(default)]
    pub backend: BackendConfig,
}

/// Configuration for the browser automation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Other WebDriver endpoints tried when the configured one refuses
    #[serde(default = "default_fallback_webdriver_urls")]
    pub fallback_webdriver_urls: Vec<String>,

    /// Whether to launch Chrome directly when no WebDriver is reachable
    #[serde(default = "default_fallback")]
    pub fallback: bool,

    /// Chrome binary for the direct launch, auto-detected when unset
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,

    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Wait after the body appears, for client-side rendering
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

fn default_max_pages() -> usize {
    1
}

fn default_max_depth() -> usize {
    1
}

fn default_max_links_per_page() -> usize {
    4
}

fn default_max_buttons() -> usize {
    15
}

fn default_max_html_size() -> Option<usize> {
    Some(2 * 1024 * 1024)
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_fallback_webdriver_urls() -> Vec<String> {
    vec![
        "http://localhost:9515".to_string(), // ChromeDriver default
        "http://127.0.0.1:4444".to_string(),
    ]
}

fn default_fallback() -> bool {
    true
}

fn default_page_timeout_secs() -> u64 {
    40
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            max_depth: default_max_depth(),
            max_links_per_page: default_max_links_per_page(),
            max_buttons: default_max_buttons(),
            max_html_size: default_max_html_size(),
            link_scope: LinkScope::default(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            backend: BackendConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            fallback_webdriver_urls: default_fallback_webdriver_urls(),
            fallback: default_fallback(),
            chrome_executable: None,
            page_timeout_secs: default_page_timeout_secs(),
            settle_delay_ms: default_settle_delay_ms(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl CrawlerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        // Surface bad patterns at load time rather than mid-crawl
        config.follow_filter()?;
        Ok(config)
    }

    /// Apply the `WEBDRIVER_URL` environment variable if it is set
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.backend.webdriver_url = webdriver_url;
            }
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_buttons: self.max_buttons,
            max_html_size: self.max_html_size,
            link_scope: self.link_scope,
        }
    }

    pub fn follow_filter(&self) -> Result<FollowFilter, ConfigError> {
        FollowFilter::new(&self.include_patterns, &self.exclude_patterns)
    }
}

impl BackendConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// The configured endpoint followed by the fallbacks, without repeats
    pub fn webdriver_endpoints(&self) -> Vec<&str> {
        let mut endpoints = vec![self.webdriver_url.as_str()];
        for url in &self.fallback_webdriver_urls {
            if !endpoints.contains(&url.as_str()) {
                endpoints.push(url);
            }
        }
        endpoints
    }
}
