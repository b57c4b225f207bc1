pub mod product;
pub mod seen;

pub use product::{Price, ProductRecord, DEFAULT_BRAND, UNKNOWN_PRODUCT_ID};
pub use seen::SeenIds;
