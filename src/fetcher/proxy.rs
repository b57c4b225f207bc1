use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{Result, ScraperError};
use crate::fetcher::http_fetcher::build_client;
use crate::fetcher::{FetchConfig, PageFetcher, ProxyConfig};

/// Environment variable consulted when the config has no API key
pub const API_KEY_ENV: &str = "ZENROWS_API_KEY";

/// Fetch through the ZenRows anti-bot proxy API.
pub struct ProxyFetcher {
    client: Client,
    endpoint: Url,
    api_key: String,
    config: ProxyConfig,
}

impl ProxyFetcher {
    /// Create a proxy fetcher, reading the key from config or environment.
    ///
    /// Fails when no key is configured anywhere.
    pub fn new(fetch: &FetchConfig, config: ProxyConfig) -> Result<Self> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        let api_key = resolve_api_key(config.api_key.as_deref(), env_key.as_deref())?;
        Self::with_key(fetch, config, api_key)
    }

    pub fn with_key(fetch: &FetchConfig, config: ProxyConfig, api_key: String) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        // the proxy does the rendering, so no browser user agent here
        let client = build_client(fetch.request_timeout(), None)?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            config,
        })
    }

    /// Proxy API URL that fetches `target`.
    pub fn request_url(&self, target: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("apikey", &self.api_key);
            query.append_pair("url", target);
            if self.config.js_render {
                query.append_pair("js_render", "true");
            }
            if self.config.premium_proxy {
                query.append_pair("premium_proxy", "true");
            }
            if let Some(ref country) = self.config.proxy_country {
                query.append_pair("proxy_country", country);
            }
        }
        url
    }
}

/// Pick the API key: config first, then environment. Blank values count
/// as missing.
pub fn resolve_api_key(configured: Option<&str>, env: Option<&str>) -> Result<String> {
    fn usable(key: Option<&str>) -> Option<&str> {
        key.map(str::trim).filter(|key| !key.is_empty())
    }
    usable(configured)
        .or_else(|| usable(env))
        .map(String::from)
        .ok_or_else(|| {
            ScraperError::Config(format!(
                "proxy strategy needs an API key: set proxy.api_key or {}",
                API_KEY_ENV
            ))
        })
}

#[async_trait]
impl PageFetcher for ProxyFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        // reqwest errors carry the request URL, which holds the API key
        let response = self
            .client
            .get(self.request_url(url))
            .send()
            .await
            .map_err(|e| e.without_url())?;
        response
            .error_for_status_ref()
            .map_err(|e| ScraperError::Http(e.without_url()))?;

        let body = response.text().await.map_err(|e| e.without_url())?;
        tracing::debug!("Fetched {} via proxy ({} bytes)", url, body.len());
        Ok(body)
    }
}
