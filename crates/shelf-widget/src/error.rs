//! Widget error types.

use thiserror::Error;

/// Errors raised while setting up the widget.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Page configuration is missing a required value.
    #[error("Invalid widget configuration: {0}")]
    Config(String),

    /// Page configuration is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
