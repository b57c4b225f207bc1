use serde::{Deserialize, Serialize};

/// Id used when an item's link carries no `i_code` parameter.
pub const UNKNOWN_PRODUCT_ID: &str = "N/A";

/// Brand used when the product name has no `【...】` prefix.
pub const DEFAULT_BRAND: &str = "General";

/// Price as emitted to the caller.
///
/// Serialized untagged, so callers see either a JSON number or a string
/// depending on the configured price format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(u64),
    Text(String),
}

impl Price {
    /// Whether the price carries a positive amount.
    pub fn is_positive(&self) -> bool {
        match self {
            Price::Amount(amount) => *amount > 0,
            Price::Text(text) => text
                .chars()
                .filter(|c| c.is_ascii_digit())
                .any(|c| c != '0'),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub product_id: String,
    pub brand_name: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_model: Option<String>,
    pub price: Price,
    pub link: String,
}

impl ProductRecord {
    pub fn has_known_id(&self) -> bool {
        self.product_id != UNKNOWN_PRODUCT_ID
    }
}
