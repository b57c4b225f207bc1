//! # momo-scraper
//!
//! Searches the momo shopping site for a keyword and prints the product
//! listings as a JSON array framed by sentinel lines, for consumption by
//! another process.
//!
//! ## Architecture
//!
//! ```text
//! PageFetcher → ListingExtractor → Paginator → framed JSON on stdout
//! ```
//!
//! - [`fetcher`]: the [`PageFetcher`](fetcher::PageFetcher) trait, static
//!   HTTP and proxy-API implementations, and the pagination driver
//! - [`browser`]: headless Chrome implementation of `PageFetcher`
//! - [`extractor`]: turns one result page into product records
//! - [`domain`]: `ProductRecord` and the per-run `SeenIds` accumulator
//!
//! ## Quick Start
//!
//! ```bash
//! momo-scraper 藍牙耳機 30
//! momo-scraper --strategy http --price-format integer "air fryer" 10
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the configured fetch
/// strategy and the extractor into a paginator.
pub mod app;

/// Headless Chrome page rendering.
pub mod browser;

/// Command-line interface using clap, plus the sentinel-framed output.
pub mod cli;

/// Configuration loaded from `~/.config/momo-scraper/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`ProductRecord`](domain::ProductRecord): one emitted listing
/// - [`SeenIds`](domain::SeenIds): product ids already emitted this run
pub mod domain;

/// Listing extraction from search result markup.
pub mod extractor;

/// Page fetching strategies and pagination.
///
/// - [`PageFetcher`](fetcher::PageFetcher): async trait over transports
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based static fetch
/// - [`ProxyFetcher`](fetcher::proxy::ProxyFetcher): ZenRows proxy API
/// - [`Paginator`](fetcher::paginate::Paginator): sequential page driver
pub mod fetcher;
