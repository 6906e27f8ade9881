use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrawlError>;

/// Failures that can occur while crawling a site.
///
/// Only `BackendUnavailable` and `InvalidUrl` abort a crawl. Navigation and
/// source errors are recorded on the page they happened on, and malformed
/// links are skipped.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("no browser automation available: {0}")]
    BackendUnavailable(String),

    #[error("navigation to {url} timed out after {}s", timeout.as_secs())]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("navigation to {url} failed: {reason}")]
    NavigationError { url: String, reason: String },

    #[error("failed to read page source: {0}")]
    PageSource(String),

    #[error("malformed URL: {0}")]
    MalformedUrl(String),

    #[error("invalid start URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    InvalidTarget(String),
}

/// Errors raised while loading a crawler configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_timeout_display() {
        let err = CrawlError::NavigationTimeout {
            url: "https://example.com".to_string(),
            timeout: Duration::from_secs(40),
        };
        assert_eq!(
            err.to_string(),
            "navigation to https://example.com timed out after 40s"
        );
    }

    #[test]
    fn test_invalid_target_is_bare_message() {
        let err = CrawlError::InvalidTarget("URL is required".to_string());
        assert_eq!(err.to_string(), "URL is required");
    }
}
