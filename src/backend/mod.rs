//! Browser automation backends.
//!
//! A crawl drives exactly one backend, chosen once by [`initialize`]: a
//! WebDriver session when a driver is reachable, otherwise (with the
//! `chromium` feature) a directly launched headless Chrome.

#[cfg(feature = "chromium")]
pub mod chromium;
pub mod webdriver;

use crate::config::BackendConfig;
use crate::error::{CrawlError, Result};
use async_trait::async_trait;

#[cfg(feature = "chromium")]
pub use chromium::ChromiumBackend;
pub use webdriver::WebDriverBackend;

/// A live browser session that can render pages
#[async_trait]
pub trait BrowserBackend: Send {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Load a URL and wait until its body is present and the page has settled
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// The rendered HTML of the current page
    async fn page_source(&mut self) -> Result<String>;

    /// Shut the browser down. Calling it again is a no-op.
    async fn dispose(&mut self) -> Result<()>;
}

/// Start a backend, preferring WebDriver and falling back to a direct launch.
///
/// Fails with `BackendUnavailable` when no variant could be started.
pub async fn initialize(config: &BackendConfig) -> Result<Box<dyn BrowserBackend>> {
    let primary_error = match WebDriverBackend::launch(config).await {
        Ok(backend) => {
            ::log::info!("Using WebDriver backend at {}", backend.endpoint());
            return Ok(Box::new(backend));
        }
        Err(e) => reason(e),
    };

    if !config.fallback {
        return Err(CrawlError::BackendUnavailable(primary_error));
    }

    ::log::warn!("WebDriver unavailable ({}), trying direct browser launch", primary_error);
    launch_fallback(config, primary_error).await
}

/// The message of a launch failure without the variant's display prefix
fn reason(error: CrawlError) -> String {
    match error {
        CrawlError::BackendUnavailable(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(feature = "chromium")]
async fn launch_fallback(config: &BackendConfig, primary_error: String) -> Result<Box<dyn BrowserBackend>> {
    match ChromiumBackend::launch(config).await {
        Ok(backend) => {
            ::log::info!("Using Chromium backend as fallback");
            Ok(Box::new(backend))
        }
        Err(e) => Err(CrawlError::BackendUnavailable(format!(
            "{primary_error}; fallback failed: {}. Install Chrome/Chromium or start a WebDriver server",
            reason(e)
        ))),
    }
}

#[cfg(not(feature = "chromium"))]
async fn launch_fallback(_config: &BackendConfig, primary_error: String) -> Result<Box<dyn BrowserBackend>> {
    Err(CrawlError::BackendUnavailable(format!(
        "{primary_error}; no fallback compiled in. Start a WebDriver server"
    )))
}
