use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;

use crate::app::Result;
use crate::fetcher::{FetchConfig, PageFetcher};

/// Static fetch: one GET per page, no JavaScript.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = build_client(config.request_timeout(), config.user_agent.as_deref())?;
        Ok(Self { client })
    }
}

/// Client shared by the static and proxy strategies.
pub(crate) fn build_client(timeout: Duration, user_agent: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-TW,zh;q=0.9,en;q=0.8"),
    );

    let mut builder = Client::builder()
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .default_headers(headers);

    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }

    Ok(builder.build()?)
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let body = response.text().await?;
        tracing::debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}
