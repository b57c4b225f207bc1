use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the headless Chrome strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Element that signals the result list has rendered
    pub list_selector: String,

    /// How long to wait for `list_selector` in seconds (default: 15)
    pub selector_timeout_secs: u64,

    /// Wait time after scrolling for lazy content in milliseconds (default: 2000)
    pub wait_after_load_ms: u64,

    /// Scroll to the bottom so lazily loaded prices render (default: true)
    pub scroll_to_bottom: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            headless: true,
            list_selector: ".listArea".to_string(),
            selector_timeout_secs: 15,
            wait_after_load_ms: 2000,
            scroll_to_bottom: true,
        }
    }
}

impl ChromeConfig {
    /// Get the selector wait limit as a Duration
    pub fn selector_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_timeout_secs)
    }

    /// Get the wait time after load as a Duration
    pub fn wait_after_load(&self) -> Duration {
        Duration::from_millis(self.wait_after_load_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ChromeConfig::default();
        assert!(config.headless);
        assert!(config.scroll_to_bottom);
        assert_eq!(config.list_selector, ".listArea");
        assert_eq!(config.selector_timeout(), Duration::from_secs(15));
        assert_eq!(config.wait_after_load(), Duration::from_millis(2000));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ChromeConfig = toml::from_str("headless = false").unwrap();
        assert!(!config.headless);
        assert_eq!(config.selector_timeout_secs, 15);
    }
}
