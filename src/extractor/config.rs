use serde::{Deserialize, Serialize};

/// How the price field is rendered in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PriceFormat {
    /// `"NT$ 1290"`
    Currency,
    /// `1290`
    Integer,
    /// Trimmed page text with grouping commas removed
    Raw,
}

/// How the product model field is filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelPolicy {
    /// Model code matched from the name, placeholder when nothing matches
    Pattern,
    /// Always the placeholder
    Placeholder,
    /// Leave the field out
    Omit,
}

/// Configuration for the listing extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Origin used to resolve relative hrefs and build canonical links
    pub origin: String,

    /// Selector for one search-result item
    pub item_selector: String,

    /// Selectors tried in order for the product name
    pub name_selectors: Vec<String>,

    /// Selectors tried in order for the price
    pub price_selectors: Vec<String>,

    /// Output format of the price field (default: currency)
    pub price_format: PriceFormat,

    /// Prefix used by the currency price format
    pub currency_prefix: String,

    /// Model field policy (default: pattern)
    pub model_policy: ModelPolicy,

    /// Value used when no model is known
    pub model_placeholder: String,

    /// Drop items whose link has no product id (default: false)
    pub require_product_id: bool,

    /// Drop items without a positive price (default: false)
    pub require_positive_price: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            origin: "https://www.momoshop.com.tw".to_string(),
            item_selector: ".listArea li".to_string(),
            name_selectors: vec![
                ".prdName".to_string(),
                "h3".to_string(),
                ".goodsName".to_string(),
            ],
            price_selectors: vec![
                ".price .money".to_string(),
                ".price b".to_string(),
                ".prdPrice".to_string(),
            ],
            price_format: PriceFormat::Currency,
            currency_prefix: "NT$ ".to_string(),
            model_policy: ModelPolicy::Pattern,
            model_placeholder: "N/A".to_string(),
            require_product_id: false,
            require_positive_price: false,
        }
    }
}
