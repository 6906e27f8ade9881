use crate::backend::BrowserBackend;
use crate::config::BackendConfig;
use crate::error::{CrawlError, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::stream::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Renders pages in a headless Chrome launched and driven over DevTools
pub struct ChromiumBackend {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    page_timeout: Duration,
    settle_delay: Duration,
}

impl ChromiumBackend {
    /// Launch a browser process and open the tab pages are rendered in
    pub async fn launch(config: &BackendConfig) -> Result<Self> {
        let browser_config = browser_config(config)?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| CrawlError::BackendUnavailable(format!("failed to launch Chrome: {e}")))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    ::log::trace!("Chrome handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                // The process is already running; do not leave it behind
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(CrawlError::BackendUnavailable(format!("failed to open tab: {e}")));
            }
        };

        Ok(Self {
            browser: Some(browser),
            page: Some(page),
            handler: Some(handler_task),
            page_timeout: config.page_timeout(),
            settle_delay: config.settle_delay(),
        })
    }

    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| CrawlError::BackendUnavailable("browser already closed".to_string()))
    }
}

fn browser_config(config: &BackendConfig) -> Result<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .no_sandbox()
        .window_size(config.window_width, config.window_height)
        .request_timeout(config.page_timeout())
        .arg("--disable-gpu")
        .arg("--disable-setuid-sandbox")
        .arg("--disable-dev-shm-usage");

    if let Some(path) = &config.chrome_executable {
        builder = builder.chrome_executable(path);
    }

    builder
        .build()
        .map_err(|e| CrawlError::BackendUnavailable(format!("invalid Chrome configuration: {e}")))
}

#[async_trait]
impl BrowserBackend for ChromiumBackend {
    fn name(&self) -> &'static str {
        "chromium"
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        let page = self.page()?;
        let timeout = self.page_timeout;

        let load = async {
            page.goto(url).await?;
            page.find_element("body").await?;
            Ok::<(), chromiumoxide::error::CdpError>(())
        };

        match tokio::time::timeout(timeout, load).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(CrawlError::NavigationError {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
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
        self.page()?
            .content()
            .await
            .map_err(|e| CrawlError::PageSource(e.to_string()))
    }

    async fn dispose(&mut self) -> Result<()> {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                ::log::debug!("Failed to close tab: {}", e);
            }
        }

        let result = match self.browser.take() {
            Some(mut browser) => {
                let closed = browser.close().await.map(|_| ());
                if let Err(e) = browser.wait().await {
                    ::log::debug!("Failed to reap Chrome process: {}", e);
                }
                closed.map_err(|e| CrawlError::BackendUnavailable(format!("failed to close Chrome: {e}")))
            }
            None => Ok(()),
        };

        if let Some(handler) = self.handler.take() {
            handler.abort();
        }

        result
    }
}
