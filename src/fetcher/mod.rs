mod config;
pub mod http_fetcher;
pub mod paginate;
pub mod proxy;

pub use config::{FetchConfig, ProxyConfig, Strategy};

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

/// A way of turning a URL into page markup.
///
/// Implementations differ only in transport: a static HTTP GET, a
/// rendering browser, or a third-party proxy API. Any failure is a
/// transport failure and ends pagination.
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Release resources held by the fetcher (browser processes etc.)
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// Build the search URL for `keyword` on 1-based page `page`.
pub fn search_url(config: &FetchConfig, keyword: &str, page: usize) -> Result<Url> {
    let mut url = Url::parse(&config.search_url)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair(&config.keyword_param, keyword);
        for (key, value) in &config.extra_params {
            query.append_pair(key, value);
        }
        query.append_pair(&config.page_param, &page.to_string());
    }
    Ok(url)
}
