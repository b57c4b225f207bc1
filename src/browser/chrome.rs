use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};

use crate::app::{Result, ScraperError};
use crate::browser::config::ChromeConfig;
use crate::fetcher::{FetchConfig, PageFetcher};

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

const SCROLL_TO_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight)";

/// Chrome-based page fetcher using chromiumoxide.
///
/// One browser process is launched per run; every fetch opens and closes
/// its own tab.
pub struct ChromeFetcher {
    browser: Mutex<Browser>,
    handler: JoinHandle<()>,
    config: ChromeConfig,
    user_agent: Option<String>,
    navigation_timeout: Duration,
}

impl ChromeFetcher {
    /// Launch a browser with the given configuration
    pub async fn new(fetch: &FetchConfig, config: ChromeConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled")
            .request_timeout(fetch.request_timeout());

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| ScraperError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            ScraperError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {
                // Drive the CDP connection
            }
        });

        Ok(Self {
            browser: Mutex::new(browser),
            handler,
            config,
            user_agent: fetch.user_agent.clone(),
            navigation_timeout: fetch.request_timeout(),
        })
    }

    async fn render(&self, page: &Page, url: &str) -> Result<String> {
        if let Some(ref ua) = self.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| ScraperError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        timeout(self.navigation_timeout, page.goto(url))
            .await
            .map_err(|_| ScraperError::Browser(format!("Navigation timed out: {}", url)))?
            .map_err(|e| ScraperError::Browser(format!("Navigation failed: {}", e)))?;

        // A missing list is not a transport failure: the extractor will
        // find no items and pagination ends there.
        if !wait_for_selector(page, &self.config.list_selector, self.config.selector_timeout())
            .await
        {
            tracing::debug!("{} not found on {}", self.config.list_selector, url);
        }

        if self.config.scroll_to_bottom {
            page.evaluate(SCROLL_TO_BOTTOM_SCRIPT)
                .await
                .map_err(|e| ScraperError::Browser(format!("Script execution failed: {}", e)))?;
        }

        sleep(self.config.wait_after_load()).await;

        page.content()
            .await
            .map_err(|e| ScraperError::Browser(format!("Failed to read page content: {}", e)))
    }
}

/// Poll until `selector` matches or `limit` elapses.
async fn wait_for_selector(page: &Page, selector: &str, limit: Duration) -> bool {
    let deadline = Instant::now() + limit;
    loop {
        if page.find_element(selector).await.is_ok() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        sleep(SELECTOR_POLL_INTERVAL).await;
    }
}

#[async_trait]
impl PageFetcher for ChromeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let page = {
            let browser = self.browser.lock().await;
            browser
                .new_page("about:blank")
                .await
                .map_err(|e| ScraperError::Browser(format!("Failed to create page: {}", e)))?
        };

        let result = self.render(&page, url).await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page: {}", e);
        }

        let html = result?;
        tracing::debug!("Rendered {} ({} bytes)", url, html.len());
        Ok(html)
    }

    async fn shutdown(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| ScraperError::Browser(format!("Failed to close browser: {}", e)))?;
        if let Err(e) = browser.wait().await {
            tracing::debug!("Browser process did not exit cleanly: {}", e);
        }
        self.handler.abort();
        Ok(())
    }
}
