//! Listing extraction for search-result pages.
//!
//! # Architecture
//!
//! ```text
//! PageFetcher → HTML → ListingExtractor → ProductRecord[]
//! ```
//!
//! The extractor never fails on page content: items that cannot be turned
//! into a record are skipped and counted, and missing optional fields fall
//! back to defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use momo_scraper::domain::SeenIds;
//! use momo_scraper::extractor::{ExtractConfig, ListingExtractor};
//!
//! let extractor = ListingExtractor::new(ExtractConfig::default())?;
//! let mut seen = SeenIds::new();
//! let page = extractor.extract(&html, &mut seen, 30);
//! ```

mod config;
mod fields;

pub use config::{ExtractConfig, ModelPolicy, PriceFormat};
pub use fields::{
    brand_from_name, canonical_link, format_price, model_from_name, product_id_from_href,
    resolve_href,
};

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::app::{Result, ScraperError};
use crate::domain::{ProductRecord, SeenIds, UNKNOWN_PRODUCT_ID};
use fields::collapse_whitespace;

/// Records extracted from one page plus enough bookkeeping for the
/// pagination driver to decide whether to continue.
#[derive(Debug, Default)]
pub struct PageExtraction {
    pub records: Vec<ProductRecord>,
    /// Number of elements matching the listing item selector
    pub listing_items: usize,
    /// Items visited but not turned into records
    pub skipped: usize,
}

impl PageExtraction {
    /// True when the page had no listing items at all.
    pub fn is_exhausted(&self) -> bool {
        self.listing_items == 0
    }
}

/// Why a listing item did not produce a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    MissingLink,
    MissingProductId,
    Duplicate(String),
    NonPositivePrice,
}

pub struct ListingExtractor {
    config: ExtractConfig,
    origin: Url,
    item_selector: Selector,
    name_selectors: Vec<Selector>,
    price_selectors: Vec<Selector>,
    anchor_selector: Selector,
}

impl ListingExtractor {
    pub fn new(config: ExtractConfig) -> Result<Self> {
        let origin = Url::parse(&config.origin)?;
        let item_selector = parse_selector(&config.item_selector)?;
        let name_selectors = config
            .name_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;
        let price_selectors = config
            .price_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;
        let anchor_selector = parse_selector("a[href]")?;

        Ok(Self {
            config,
            origin,
            item_selector,
            name_selectors,
            price_selectors,
            anchor_selector,
        })
    }

    /// Extract at most `capacity` new records from one page of markup.
    ///
    /// Ids of emitted records are added to `seen`; items whose id is
    /// already there are skipped without counting against `capacity`.
    pub fn extract(&self, html: &str, seen: &mut SeenIds, capacity: usize) -> PageExtraction {
        let document = Html::parse_document(html);
        let items: Vec<ElementRef<'_>> = document.select(&self.item_selector).collect();

        let mut page = PageExtraction {
            listing_items: items.len(),
            ..Default::default()
        };

        for item in items {
            if page.records.len() >= capacity {
                break;
            }

            match self.extract_item(item, seen) {
                Ok(record) => page.records.push(record),
                Err(reason) => {
                    tracing::debug!("Skipped listing item: {:?}", reason);
                    page.skipped += 1;
                }
            }
        }

        page
    }

    fn extract_item(
        &self,
        item: ElementRef<'_>,
        seen: &mut SeenIds,
    ) -> std::result::Result<ProductRecord, SkipReason> {
        let name = first_text(item, &self.name_selectors).ok_or(SkipReason::MissingName)?;

        let (product_id, link) = self.pick_link(item).ok_or(SkipReason::MissingLink)?;
        let product_id = match product_id {
            Some(id) if seen.contains(&id) => return Err(SkipReason::Duplicate(id)),
            Some(id) => id,
            None if self.config.require_product_id => return Err(SkipReason::MissingProductId),
            None => UNKNOWN_PRODUCT_ID.to_string(),
        };

        let price_text = first_text(item, &self.price_selectors).unwrap_or_default();
        let price = format_price(
            &price_text,
            self.config.price_format,
            &self.config.currency_prefix,
        );
        if self.config.require_positive_price && !price.is_positive() {
            return Err(SkipReason::NonPositivePrice);
        }

        let product_model = match self.config.model_policy {
            ModelPolicy::Pattern => Some(
                model_from_name(&name)
                    .unwrap_or(&self.config.model_placeholder)
                    .to_string(),
            ),
            ModelPolicy::Placeholder => Some(self.config.model_placeholder.clone()),
            ModelPolicy::Omit => None,
        };

        let record = ProductRecord {
            brand_name: brand_from_name(&name),
            product_name: name,
            product_model,
            price,
            link,
            product_id,
        };

        if record.has_known_id() {
            seen.insert(&record.product_id);
        }

        Ok(record)
    }

    /// Choose the item's link.
    ///
    /// Prefers the first anchor carrying a product id, which is returned
    /// with its canonical link. Otherwise the first usable anchor is used
    /// as-is with no id.
    fn pick_link(&self, item: ElementRef<'_>) -> Option<(Option<String>, String)> {
        let mut fallback = None;

        for anchor in item.select(&self.anchor_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(resolved) = resolve_href(&self.origin, href) else {
                continue;
            };

            if let Some(id) = product_id_from_href(&resolved) {
                let link = canonical_link(&self.origin, id);
                return Some((Some(id.to_string()), link));
            }

            if fallback.is_none() {
                fallback = Some(resolved);
            }
        }

        fallback.map(|link| (None, link))
    }
}

/// Text of the first element, across `selectors` in order, that has any.
fn first_text(item: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .flat_map(|selector| item.select(selector))
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
