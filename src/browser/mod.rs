//! Headless browser rendering for result pages that need JavaScript.
//!
//! # Usage
//!
//! ```rust,ignore
//! use momo_scraper::browser::{ChromeConfig, ChromeFetcher};
//! use momo_scraper::fetcher::{FetchConfig, PageFetcher};
//!
//! let fetcher = ChromeFetcher::new(&FetchConfig::default(), ChromeConfig::default()).await?;
//! let html = fetcher.fetch("https://www.momoshop.com.tw/search/searchShop.jsp?keyword=tv").await?;
//! fetcher.shutdown().await?;
//! ```

mod chrome;
mod config;

pub use chrome::ChromeFetcher;
pub use config::ChromeConfig;
