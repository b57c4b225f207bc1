use std::sync::Arc;

use crate::app::error::Result;
use crate::browser::{ChromeConfig, ChromeFetcher};
use crate::config::Config;
use crate::extractor::ListingExtractor;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::paginate::Paginator;
use crate::fetcher::proxy::ProxyFetcher;
use crate::fetcher::{FetchConfig, PageFetcher, ProxyConfig, Strategy};

pub struct AppContext {
    pub paginator: Paginator,
}

impl AppContext {
    /// Wire up the configured fetch strategy and extractor.
    ///
    /// The extractor is built first so that a bad selector is reported
    /// before any browser is launched.
    pub async fn new(config: Config) -> Result<Self> {
        let extractor = ListingExtractor::new(config.extract)?;
        let fetcher = Self::build_fetcher(&config.fetch, config.browser, config.proxy).await?;
        Ok(Self::with_fetcher(fetcher, extractor, config.fetch))
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn PageFetcher + Send + Sync>,
        extractor: ListingExtractor,
        fetch: FetchConfig,
    ) -> Self {
        Self {
            paginator: Paginator::new(fetcher, extractor, fetch),
        }
    }

    async fn build_fetcher(
        fetch: &FetchConfig,
        browser: ChromeConfig,
        proxy: ProxyConfig,
    ) -> Result<Arc<dyn PageFetcher + Send + Sync>> {
        tracing::debug!("Using {:?} fetch strategy", fetch.strategy);
        let fetcher: Arc<dyn PageFetcher + Send + Sync> = match fetch.strategy {
            Strategy::Browser => Arc::new(ChromeFetcher::new(fetch, browser).await?),
            Strategy::Http => Arc::new(HttpFetcher::new(fetch)?),
            Strategy::Proxy => Arc::new(ProxyFetcher::new(fetch, proxy)?),
        };
        Ok(fetcher)
    }

    pub async fn shutdown(&self) {
        if let Err(e) = self.paginator.fetcher().shutdown().await {
            tracing::warn!("Failed to shut down fetcher: {}", e);
        }
    }
}
