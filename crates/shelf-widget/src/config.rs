//! Page-injected widget configuration.

use crate::WidgetError;
use serde::{Deserialize, Serialize};
use shelf_commerce::search::MIN_TERM_CHARS;
use shelf_commerce::Labels;
use std::time::Duration;

/// Name of the page-global object holding the configuration.
pub const PAGE_GLOBAL: &str = "quickShelf";

/// Values the host page injects at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Absolute URL of the search route.
    pub rest_url: String,
    /// Anti-forgery token for the current page view.
    pub nonce: String,
}

impl PageConfig {
    pub fn new(rest_url: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            rest_url: rest_url.into(),
            nonce: nonce.into(),
        }
    }
}

/// Full widget configuration.
///
/// Only `restUrl` is required; everything else has a default. Label keys
/// are accepted in either snake_case or camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    pub rest_url: String,
    pub nonce: String,
    /// Header the nonce travels in.
    pub nonce_header: String,
    /// Quiet window before a lookup fires.
    pub debounce_ms: u64,
    /// Minimum trimmed input length that triggers a lookup.
    pub min_term_chars: usize,
    /// Image shown for results without a thumbnail.
    pub placeholder_image: String,
    pub labels: Labels,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            rest_url: String::new(),
            nonce: String::new(),
            nonce_header: "X-Shelf-Nonce".to_string(),
            debounce_ms: 300,
            min_term_chars: MIN_TERM_CHARS,
            placeholder_image: "placeholder-image.png".to_string(),
            labels: Labels::default(),
        }
    }
}

impl WidgetConfig {
    /// Configuration pointing at a search URL.
    pub fn new(rest_url: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            rest_url: rest_url.into(),
            nonce: nonce.into(),
            ..Self::default()
        }
    }

    /// Parse the page-global configuration object.
    pub fn from_page_json(json: &str) -> Result<Self, WidgetError> {
        let config: Self = serde_json::from_str(json)?;
        if config.rest_url.trim().is_empty() {
            return Err(WidgetError::Config("restUrl is required".to_string()));
        }
        if config.nonce_header.trim().is_empty() {
            return Err(WidgetError::Config("nonceHeader must not be empty".to_string()));
        }
        if config.min_term_chars < MIN_TERM_CHARS {
            return Err(WidgetError::Config(format!(
                "minTermChars must be at least {}",
                MIN_TERM_CHARS
            )));
        }
        Ok(config)
    }

    pub fn with_placeholder_image(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image = url.into();
        self
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl From<PageConfig> for WidgetConfig {
    fn from(page: PageConfig) -> Self {
        Self::new(page.rest_url, page.nonce)
    }
}
