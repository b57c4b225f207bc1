use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which [`PageFetcher`](crate::fetcher::PageFetcher) implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Render pages in headless Chrome
    Browser,
    /// Plain HTTP GET
    Http,
    /// Fetch through the ZenRows proxy API
    Proxy,
}

/// Configuration for fetching and paginating search results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Fetch strategy (default: browser)
    pub strategy: Strategy,

    /// Search page URL without query
    pub search_url: String,

    /// Query parameter carrying the keyword
    pub keyword_param: String,

    /// Query parameter carrying the 1-based page number
    pub page_param: String,

    /// Extra fixed query parameters appended to every search URL
    pub extra_params: Vec<(String, String)>,

    /// Maximum number of result pages per run (default: 10)
    pub max_pages: usize,

    /// Stop when a page has listing items but none become new records
    /// (default: false)
    pub stop_on_empty_page: bool,

    /// Timeout for a single page fetch in seconds (default: 60)
    pub request_timeout_secs: u64,

    /// Overall run deadline in seconds (default: 300)
    pub run_timeout_secs: u64,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Browser,
            search_url: "https://www.momoshop.com.tw/search/searchShop.jsp".to_string(),
            keyword_param: "keyword".to_string(),
            page_param: "curPage".to_string(),
            extra_params: vec![("searchType".to_string(), "1".to_string())],
            max_pages: 10,
            stop_on_empty_page: false,
            request_timeout_secs: 60,
            run_timeout_secs: 300,
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

impl FetchConfig {
    /// Get the per-request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the run deadline as a Duration
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }
}

/// Configuration for the ZenRows proxy strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Proxy API endpoint
    pub endpoint: String,

    /// API key; falls back to the `ZENROWS_API_KEY` environment variable
    pub api_key: Option<String>,

    /// Ask the proxy to render JavaScript (default: true)
    pub js_render: bool,

    /// Route through residential proxies (default: true)
    pub premium_proxy: bool,

    /// Exit country for the proxy (default: "tw")
    pub proxy_country: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.zenrows.com/v1/".to_string(),
            api_key: None,
            js_render: true,
            premium_proxy: true,
            proxy_country: Some("tw".to_string()),
        }
    }
}
