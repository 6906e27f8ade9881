use pagewalk::backend::{self, BrowserBackend, WebDriverBackend};
use pagewalk::{BackendConfig, CrawlStatus, Crawler, CrawlerConfig};

fn quick_backend() -> BackendConfig {
    BackendConfig {
        settle_delay_ms: 200,
        page_timeout_secs: 20,
        ..BackendConfig::default()
    }
}

#[tokio::test]
#[ignore] // Requires a WebDriver server on localhost:4444 or :9515
async fn test_webdriver_renders_page() {
    let mut backend = WebDriverBackend::launch(&quick_backend()).await.unwrap();

    backend.navigate("https://example.com/").await.unwrap();
    let html = backend.page_source().await.unwrap();
    assert!(html.contains("Example Domain"));

    backend.dispose().await.unwrap();
    // Second dispose is a no-op
    backend.dispose().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires ChromeDriver or Chrome/Chromium installed
async fn test_initialize_picks_a_backend() {
    let mut backend = backend::initialize(&quick_backend()).await.unwrap();
    assert!(["webdriver", "chromium"].contains(&backend.name()));
    backend.dispose().await.unwrap();
}

#[cfg(feature = "chromium")]
#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_chromium_renders_page() {
    let mut backend = backend::ChromiumBackend::launch(&quick_backend()).await.unwrap();

    backend.navigate("https://example.com/").await.unwrap();
    let html = backend.page_source().await.unwrap();
    assert!(html.contains("Example Domain"));

    backend.dispose().await.unwrap();
    backend.dispose().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires ChromeDriver or Chrome/Chromium installed
async fn test_crawl_example_domain() {
    let config = CrawlerConfig {
        backend: quick_backend(),
        ..CrawlerConfig::default()
    };
    let result = Crawler::new(config).unwrap().crawl("https://example.com").await;

    assert_eq!(result.status, CrawlStatus::Success);
    assert_eq!(result.total_pages, 1);
    assert_eq!(result.base_url.as_deref(), Some("https://example.com"));

    let page = &result.pages[0];
    assert!(page.error.is_none());
    assert_eq!(page.metadata.title, "Example Domain");
    assert_eq!(page.headers["h1"], vec!["Example Domain"]);
    assert!(page.links.internal.is_empty());
}
