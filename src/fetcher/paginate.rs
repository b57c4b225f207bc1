use std::sync::Arc;

use tokio::time::{timeout, Instant};

use crate::domain::{ProductRecord, SeenIds};
use crate::extractor::ListingExtractor;
use crate::fetcher::{search_url, FetchConfig, PageFetcher};

/// Why a paginated search stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The requested number of records was collected
    CapacityReached,
    /// A page had no listing items
    Exhausted,
    /// A page had listing items but none of them produced a new record,
    /// with `stop_on_empty_page` set
    NoNewRecords,
    /// `max_pages` pages were fetched
    PageLimit,
    /// The run deadline elapsed
    Deadline,
    /// A page could not be fetched
    Transport(String),
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub records: Vec<ProductRecord>,
    pub pages_fetched: usize,
    pub stop_reason: StopReason,
}

/// Sequential page-by-page search driver.
///
/// Every stop condition keeps what was collected so far; nothing here
/// returns an error.
pub struct Paginator {
    fetcher: Arc<dyn PageFetcher + Send + Sync>,
    extractor: ListingExtractor,
    config: FetchConfig,
}

impl Paginator {
    pub fn new(
        fetcher: Arc<dyn PageFetcher + Send + Sync>,
        extractor: ListingExtractor,
        config: FetchConfig,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    pub fn fetcher(&self) -> &Arc<dyn PageFetcher + Send + Sync> {
        &self.fetcher
    }

    pub async fn search(&self, keyword: &str, max_results: usize) -> SearchOutcome {
        let deadline = Instant::now() + self.config.run_timeout();
        let mut seen = SeenIds::new();
        let mut records = Vec::new();
        let mut pages_fetched = 0;

        let stop_reason = loop {
            if records.len() >= max_results {
                break StopReason::CapacityReached;
            }
            if pages_fetched >= self.config.max_pages {
                break StopReason::PageLimit;
            }

            let page_number = pages_fetched + 1;
            let url = match search_url(&self.config, keyword, page_number) {
                Ok(url) => url,
                Err(e) => break StopReason::Transport(e.to_string()),
            };

            let remaining = deadline.saturating_duration_since(Instant::now());
            let html = match timeout(remaining, self.fetcher.fetch(url.as_str())).await {
                Ok(Ok(html)) => html,
                Ok(Err(e)) => {
                    tracing::warn!("Failed to fetch page {}: {}", page_number, e);
                    break StopReason::Transport(e.to_string());
                }
                Err(_) => {
                    tracing::warn!("Run deadline reached while fetching page {}", page_number);
                    break StopReason::Deadline;
                }
            };
            pages_fetched += 1;

            let capacity = max_results - records.len();
            let page = self.extractor.extract(&html, &mut seen, capacity);
            tracing::info!(
                "Page {}: {} listing items, {} new records, {} skipped (total {})",
                page_number,
                page.listing_items,
                page.records.len(),
                page.skipped,
                records.len() + page.records.len()
            );

            if page.is_exhausted() {
                break StopReason::Exhausted;
            }
            if page.records.is_empty() && self.config.stop_on_empty_page {
                break StopReason::NoNewRecords;
            }
            records.extend(page.records);
        };

        tracing::info!(
            "Search for {:?} finished after {} pages with {} records ({:?})",
            keyword,
            pages_fetched,
            records.len(),
            stop_reason
        );

        SearchOutcome {
            records,
            pages_fetched,
            stop_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::app::{Result, ScraperError};
    use crate::extractor::ExtractConfig;

    /// Serves canned pages in order, recording requested URLs.
    struct ScriptedFetcher {
        pages: Mutex<Vec<Result<String>>>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<Result<String>>) -> Arc<Self> {
            let mut pages = pages;
            pages.reverse();
            Arc::new(Self {
                pages: Mutex::new(pages),
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    struct SlowFetcher;

    #[async_trait]
    impl PageFetcher for SlowFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    fn page(ids: &[u32]) -> String {
        let items: String = ids
            .iter()
            .map(|id| {
                format!(
                    r#"<li><a href="/goods/GoodsDetail.jsp?i_code={id}"><span class="prdName">【Acme】Item {id}</span></a><p class="price"><b>{id}00</b></p></li>"#
                )
            })
            .collect();
        format!(r#"<div class="listArea"><ul>{items}</ul></div>"#)
    }

    fn paginator(fetcher: Arc<dyn PageFetcher + Send + Sync>, config: FetchConfig) -> Paginator {
        let extractor = ListingExtractor::new(ExtractConfig::default()).unwrap();
        Paginator::new(fetcher, extractor, config)
    }

    #[test]
    fn test_collects_across_pages_until_capacity() {
        let fetcher = ScriptedFetcher::new(vec![Ok(page(&[1, 2, 3])), Ok(page(&[4, 5, 6]))]);
        let p = paginator(fetcher.clone(), FetchConfig::default());

        let outcome = tokio_test::block_on(p.search("widget", 5));

        assert_eq!(outcome.records.len(), 5);
        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(outcome.stop_reason, StopReason::CapacityReached);

        let requested = fetcher.requested.lock().unwrap();
        assert!(requested[0].ends_with("curPage=1"));
        assert!(requested[1].ends_with("curPage=2"));
    }

    #[test]
    fn test_empty_page_stops_and_keeps_previous_records() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(&[1, 2])),
            Ok("<html><body>no results</body></html>".to_string()),
            Ok(page(&[3])),
        ]);
        let p = paginator(fetcher, FetchConfig::default());

        let outcome = tokio_test::block_on(p.search("widget", 50));

        assert_eq!(outcome.stop_reason, StopReason::Exhausted);
        assert_eq!(outcome.pages_fetched, 2);
        let ids: Vec<_> = outcome.records.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_repeated_page_stops_when_configured() {
        let fetcher = ScriptedFetcher::new(vec![Ok(page(&[1, 2])), Ok(page(&[2, 1]))]);
        let config = FetchConfig {
            stop_on_empty_page: true,
            ..Default::default()
        };
        let p = paginator(fetcher, config);

        let outcome = tokio_test::block_on(p.search("widget", 50));

        assert_eq!(outcome.stop_reason, StopReason::NoNewRecords);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.pages_fetched, 2);
    }

    #[test]
    fn test_repeated_page_does_not_duplicate_by_default() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(&[1, 2])),
            Ok(page(&[2, 1])),
            Ok(page(&[3])),
        ]);
        let p = paginator(fetcher, FetchConfig::default());

        let outcome = tokio_test::block_on(p.search("widget", 50));

        let ids: Vec<_> = outcome.records.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(outcome.stop_reason, StopReason::Exhausted);
    }

    #[test]
    fn test_page_of_skipped_items_does_not_stop_pagination() {
        let unnamed = r#"<div class="listArea"><ul>
            <li><a href="/goods/GoodsDetail.jsp?i_code=10">no name</a></li>
            <li><a href="/goods/GoodsDetail.jsp?i_code=11">no name either</a></li>
        </ul></div>"#;
        let fetcher = ScriptedFetcher::new(vec![Ok(unnamed.to_string()), Ok(page(&[7]))]);
        let p = paginator(fetcher.clone(), FetchConfig::default());

        let outcome = tokio_test::block_on(p.search("widget", 50));

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].product_id, "7");
        assert_eq!(outcome.pages_fetched, 3);
        assert_eq!(outcome.stop_reason, StopReason::Exhausted);
        assert_eq!(fetcher.requested.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_overlapping_pages_are_deduplicated() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(&[1, 2, 3])),
            Ok(page(&[3, 4])),
            Ok(String::new()),
        ]);
        let p = paginator(fetcher, FetchConfig::default());

        let outcome = tokio_test::block_on(p.search("widget", 50));

        let ids: HashSet<_> = outcome.records.iter().map(|r| r.product_id.clone()).collect();
        assert_eq!(ids.len(), outcome.records.len());
        assert_eq!(outcome.records.len(), 4);
    }

    #[test]
    fn test_transport_error_returns_partial_results() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(&[1, 2])),
            Err(ScraperError::Browser("Navigation failed: connection reset".into())),
        ]);
        let p = paginator(fetcher, FetchConfig::default());

        let outcome = tokio_test::block_on(p.search("widget", 50));

        assert!(matches!(outcome.stop_reason, StopReason::Transport(_)));
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.pages_fetched, 1);
    }

    #[test]
    fn test_page_limit() {
        let fetcher = ScriptedFetcher::new(vec![Ok(page(&[1])), Ok(page(&[2])), Ok(page(&[3]))]);
        let config = FetchConfig {
            max_pages: 2,
            ..Default::default()
        };
        let p = paginator(fetcher, config);

        let outcome = tokio_test::block_on(p.search("widget", 50));

        assert_eq!(outcome.stop_reason, StopReason::PageLimit);
        assert_eq!(outcome.records.len(), 2);
    }

    #[test]
    fn test_zero_max_results_fetches_nothing() {
        let fetcher = ScriptedFetcher::new(vec![Ok(page(&[1]))]);
        let p = paginator(fetcher.clone(), FetchConfig::default());

        let outcome = tokio_test::block_on(p.search("widget", 0));

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.pages_fetched, 0);
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_deadline_truncates() {
        let config = FetchConfig {
            run_timeout_secs: 0,
            ..Default::default()
        };
        let p = paginator(Arc::new(SlowFetcher), config);

        let outcome = p.search("widget", 10).await;

        assert_eq!(outcome.stop_reason, StopReason::Deadline);
        assert!(outcome.records.is_empty());
    }
}
