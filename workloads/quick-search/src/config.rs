//! Endpoint configuration.

use serde::{Deserialize, Serialize};
use shelf_commerce::search::{MAX_RESULTS, MIN_TERM_CHARS};
use shelf_commerce::{Currency, Labels};
use shelf_core::join_route;
use shelf_observability::{LogFormat, LogLevel};
use thiserror::Error;

/// Configuration compiled into the component.
pub const EMBEDDED_CONFIG: &str = include_str!("../quick-search.toml");

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Search endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Workload name used in logs and the manifest.
    pub name: String,
    /// Prefix of every route.
    pub route_base: String,
    /// Spin SQLite database label.
    pub database: String,
    /// Maximum results per search, at most 10.
    pub result_limit: usize,
    /// Minimum sanitized term length.
    pub min_term_chars: usize,
    /// Currency code for catalog rows without one.
    pub currency: String,
    /// Header the widget sends the anti-forgery token in.
    pub nonce_header: String,
    pub logging: LoggingConfig,
    pub labels: Labels,
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            name: "quick-search".to_string(),
            route_base: "/quick-shelf/v1".to_string(),
            database: "default".to_string(),
            result_limit: MAX_RESULTS,
            min_term_chars: MIN_TERM_CHARS,
            currency: "USD".to_string(),
            nonce_header: "X-Shelf-Nonce".to_string(),
            logging: LoggingConfig::default(),
            labels: Labels::default(),
        }
    }
}

impl SearchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration compiled into the component.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml(EMBEDDED_CONFIG)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_RESULTS).contains(&self.result_limit) {
            return Err(ConfigError::Invalid {
                field: "result_limit",
                message: format!("must be between 1 and {}", MAX_RESULTS),
            });
        }
        if self.min_term_chars < MIN_TERM_CHARS {
            return Err(ConfigError::Invalid {
                field: "min_term_chars",
                message: format!("must be at least {}", MIN_TERM_CHARS),
            });
        }
        if !self.route_base.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "route_base",
                message: "must start with '/'".to_string(),
            });
        }
        self.currency()?;
        Ok(())
    }

    pub fn currency(&self) -> Result<Currency, ConfigError> {
        Currency::from_code(&self.currency).ok_or_else(|| ConfigError::Invalid {
            field: "currency",
            message: format!("unknown currency code {}", self.currency),
        })
    }

    /// Full path of the search route.
    pub fn search_route(&self) -> String {
        join_route(&self.route_base, "search")
    }
}
