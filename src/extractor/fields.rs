//! Field-level heuristics shared by every fetch strategy.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::domain::{Price, DEFAULT_BRAND};
use crate::extractor::config::PriceFormat;

static BRAND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【([^】]+)】").expect("hardcoded regex pattern is valid"));

static MODEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9]+-[A-Za-z0-9]+|[A-Z]{2,}[0-9]{2,}[A-Z0-9]*)")
        .expect("hardcoded regex pattern is valid")
});

static PRODUCT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]i_code=(\d+)").expect("hardcoded regex pattern is valid"));

static PRICE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*").expect("hardcoded regex pattern is valid"));

/// Brand taken from the first `【...】` pair in the name.
pub fn brand_from_name(name: &str) -> String {
    BRAND_REGEX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|brand| !brand.is_empty())
        .unwrap_or(DEFAULT_BRAND)
        .to_string()
}

/// First model-code-looking token in the name, e.g. `X1-200` or `KDL55W`.
pub fn model_from_name(name: &str) -> Option<&str> {
    MODEL_REGEX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Digits of the `i_code` query parameter.
pub fn product_id_from_href(href: &str) -> Option<&str> {
    PRODUCT_ID_REGEX
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Detail page URL for a known product id.
pub fn canonical_link(origin: &Url, product_id: &str) -> String {
    let mut link = origin.clone();
    link.set_path("/goods/GoodsDetail.jsp");
    link.set_query(Some(&format!("i_code={}", product_id)));
    link.set_fragment(None);
    link.into()
}

/// Resolve an anchor href against the site origin.
///
/// Returns `None` for placeholders (`#`, `javascript:`) and anything that
/// does not end up as an http(s) URL.
pub fn resolve_href(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let resolved = origin.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.into()),
        _ => None,
    }
}

/// First number in the price text with grouping separators removed.
pub fn price_digits(text: &str) -> Option<String> {
    PRICE_REGEX
        .find(text)
        .map(|m| m.as_str().replace(',', ""))
}

/// Render price text according to the configured format.
///
/// Missing or unparseable prices become zero (or an empty string for
/// [`PriceFormat::Raw`]).
pub fn format_price(text: &str, format: PriceFormat, currency_prefix: &str) -> Price {
    match format {
        PriceFormat::Currency => {
            let digits = price_digits(text).unwrap_or_else(|| "0".to_string());
            Price::Text(format!("{}{}", currency_prefix, digits))
        }
        PriceFormat::Integer => Price::Amount(
            price_digits(text)
                .and_then(|digits| digits.parse().ok())
                .unwrap_or(0),
        ),
        PriceFormat::Raw => Price::Text(text.replace(',', "").trim().to_string()),
    }
}

/// Trim and collapse runs of whitespace, roughly what `innerText` yields.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
