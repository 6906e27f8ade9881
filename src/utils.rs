use crate::error::{CrawlError, Result};
use url::Url;

/// Appended to HTML that was cut at the size cap
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// Cuts `html` to at most `max_bytes` bytes on a char boundary and appends the
/// truncation marker. Returns the input untouched when it already fits.
pub fn truncate_html(html: &str, max_bytes: usize) -> (String, bool) {
    if html.len() <= max_bytes {
        return (html.to_string(), false);
    }

    let mut end = max_bytes;
    while !html.is_char_boundary(end) {
        end -= 1;
    }

    let mut truncated = String::with_capacity(end + TRUNCATION_MARKER.len());
    truncated.push_str(&html[..end]);
    truncated.push_str(TRUNCATION_MARKER);
    (truncated, true)
}

/// Validates user input before it reaches the crawler.
///
/// Empty input is rejected, `https://` is assumed when no scheme is given,
/// and the result must parse as a URL.
pub fn normalize_target(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CrawlError::InvalidTarget("URL is required".to_string()));
    }

    let normalized = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    match Url::parse(&normalized) {
        Ok(url) if url.host_str().is_some() => Ok(normalized),
        _ => Err(CrawlError::InvalidTarget("Invalid URL format".to_string())),
    }
}
