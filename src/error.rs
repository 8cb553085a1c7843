use crate::browser::BrowserError;
use std::time::Duration;

/// Errors raised while discovering, extracting or exporting school records
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("Timed out after {waited:?} waiting for page to be ready: {condition}")]
    Timeout { condition: String, waited: Duration },

    #[error("Navigation to {url} failed after all retries")]
    NavigationExhausted { url: String },

    #[error("Element not found in ready page: {0}")]
    MissingElement(String),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
