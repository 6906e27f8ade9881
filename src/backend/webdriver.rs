use crate::backend::BrowserBackend;
use crate::config::BackendConfig;
use crate::error::{CrawlError, Result};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::wd::{Capabilities, TimeoutConfiguration};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;

/// Renders pages through a WebDriver session (ChromeDriver, Selenium, ...)
pub struct WebDriverBackend {
    client: Option<Client>,
    endpoint: String,
    page_timeout: Duration,
    settle_delay: Duration,
}

impl WebDriverBackend {
    /// Open a session on the configured endpoint or one of its fallbacks
    pub async fn launch(config: &BackendConfig) -> Result<Self> {
        let capabilities = chrome_capabilities(config);
        let mut failures = Vec::new();

        for endpoint in config.webdriver_endpoints() {
            let mut builder = ClientBuilder::native();
            builder.capabilities(capabilities.clone());

            match builder.connect(endpoint).await {
                Ok(client) => {
                    ::log::debug!("Connected to WebDriver at {}", endpoint);
                    // Otherwise an abandoned load keeps the session busy for the driver's own limit
                    if let Err(e) = client.update_timeouts(session_timeouts(config.page_timeout())).await {
                        ::log::warn!("Failed to set page load timeout on {}: {}", endpoint, e);
                    }
                    return Ok(Self {
                        client: Some(client),
                        endpoint: endpoint.to_string(),
                        page_timeout: config.page_timeout(),
                        settle_delay: config.settle_delay(),
                    });
                }
                Err(e) => {
                    ::log::debug!("WebDriver at {} refused: {}", endpoint, e);
                    failures.push(format!("{endpoint}: {e}"));
                }
            }
        }

        Err(CrawlError::BackendUnavailable(format!(
            "failed to connect to any WebDriver server ({})",
            failures.join(", ")
        )))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn client(&self) -> Result<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| CrawlError::BackendUnavailable("WebDriver session already closed".to_string()))
    }
}

/// Headless Chrome options requested from the driver
fn chrome_capabilities(config: &BackendConfig) -> Capabilities {
    let window_size = format!("--window-size={},{}", config.window_width, config.window_height);
    let mut capabilities = Capabilities::new();
    capabilities.insert("browserName".to_string(), json!("chrome"));
    capabilities.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "args": [
                "--headless",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                window_size,
            ]
        }),
    );
    capabilities
}

/// Driver-side limits matching the per-page deadline
fn session_timeouts(page_timeout: Duration) -> TimeoutConfiguration {
    TimeoutConfiguration::new(None, Some(page_timeout), None)
}

fn navigation_error(url: &str, timeout: Duration, error: CmdError) -> CrawlError {
    match error {
        CmdError::WaitTimeout => CrawlError::NavigationTimeout {
            url: url.to_string(),
            timeout,
        },
        other => CrawlError::NavigationError {
            url: url.to_string(),
            reason: other.to_string(),
        },
    }
}

#[async_trait]
impl BrowserBackend for WebDriverBackend {
    fn name(&self) -> &'static str {
        "webdriver"
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        let client = self.client()?;
        let timeout = self.page_timeout;

        let load = async {
            client.goto(url).await?;
            client
                .wait()
                .at_most(timeout)
                .for_element(Locator::Css("body"))
                .await?;
            Ok::<(), CmdError>(())
        };

        // goto itself has no deadline of its own, so bound the whole load
        match tokio::time::timeout(timeout, load).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(navigation_error(url, timeout, e)),
            Err(_) => {
                return Err(CrawlError::NavigationTimeout {
                    url: url.to_string(),
                    timeout,
                });
            }
        }

        tokio::time::sleep(self.settle_delay).await;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String> {
        self.client()?
            .source()
            .await
            .map_err(|e| CrawlError::PageSource(e.to_string()))
    }

    async fn dispose(&mut self) -> Result<()> {
        let Some(client) = self.client.take() else {
            return Ok(());
        };

        ::log::debug!("Closing WebDriver session at {}", self.endpoint);
        client
            .close()
            .await
            .map_err(|e| CrawlError::BackendUnavailable(format!("failed to close WebDriver session: {e}")))
    }
}
