//! Configuration management for momo-scraper.
//!
//! Configuration is read from `~/.config/momo-scraper/config.toml` unless
//! a path is given explicitly. If the default file doesn't exist, a default
//! configuration with comments is created.

use crate::browser::ChromeConfig;
use crate::extractor::ExtractConfig;
use crate::fetcher::{FetchConfig, ProxyConfig};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    pub browser: ChromeConfig,
    pub proxy: ProxyConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/momo-scraper/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("momo-scraper").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> &'static str {
        r##"# momo-scraper configuration
#
# Every key is optional; missing keys use the values shown here.

[fetch]
# How pages are fetched: "browser" (headless Chrome), "http" (plain GET)
# or "proxy" (ZenRows API, needs an API key)
strategy = "browser"

search_url = "https://www.momoshop.com.tw/search/searchShop.jsp"
keyword_param = "keyword"
page_param = "curPage"
extra_params = [["searchType", "1"]]

# Stop after this many result pages
max_pages = 10

# Also stop when a page has items but none of them yield a new record
stop_on_empty_page = false

# Timeout for one page fetch, and for the whole run (seconds)
request_timeout_secs = 60
run_timeout_secs = 300

[extract]
origin = "https://www.momoshop.com.tw"
item_selector = ".listArea li"
name_selectors = [".prdName", "h3", ".goodsName"]
price_selectors = [".price .money", ".price b", ".prdPrice"]

# "currency" ("NT$ 1290"), "integer" (1290) or "raw" (page text)
price_format = "currency"
currency_prefix = "NT$ "

# "pattern" (model code from the name), "placeholder" or "omit"
model_policy = "pattern"
model_placeholder = "N/A"

# Drop items without an i_code id / without a positive price
require_product_id = false
require_positive_price = false

[browser]
headless = true
list_selector = ".listArea"
selector_timeout_secs = 15
wait_after_load_ms = 2000
scroll_to_bottom = true

[proxy]
endpoint = "https://api.zenrows.com/v1/"
# api_key = "..."   (or set ZENROWS_API_KEY)
js_render = true
premium_proxy = true
proxy_country = "tw"
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{ModelPolicy, PriceFormat};
    use crate::fetcher::Strategy;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.fetch.strategy, Strategy::Browser);
        assert_eq!(config.fetch.max_pages, 10);
        assert!(!config.fetch.stop_on_empty_page);
        assert_eq!(
            config.fetch.extra_params,
            vec![("searchType".to_string(), "1".to_string())]
        );
        assert_eq!(config.extract.price_format, PriceFormat::Currency);
        assert_eq!(config.extract.model_policy, ModelPolicy::Pattern);
        assert_eq!(config.browser.list_selector, ".listArea");
        assert!(config.proxy.api_key.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[fetch]
strategy = "http"

[extract]
price_format = "integer"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.fetch.strategy, Strategy::Http);
        assert_eq!(config.extract.price_format, PriceFormat::Integer);
        // Default values
        assert_eq!(config.fetch.max_pages, 10);
        assert_eq!(config.extract.item_selector, ".listArea li");
        assert!(config.browser.headless);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.fetch.strategy, Strategy::Browser);
        assert_eq!(config.extract.currency_prefix, "NT$ ");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[proxy]\napi_key = \"from-file\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.proxy.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fetch]\nstrategy = \"carrier-pigeon\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_create_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::create_default_config(&path).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.fetch.max_pages, 10);
    }
}
