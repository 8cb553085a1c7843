//! The page capability the scraping core drives.
//!
//! A run owns exactly one page and issues one operation at a time against it.
//! The headless browser tab (`browser::ChromePage`) is the production
//! implementation; tests script their own.

use crate::error::ScrapeError;
use async_trait::async_trait;

#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate to `url` and wait for the load event
    async fn goto(&self, url: &str) -> Result<(), ScrapeError>;

    /// Click the first element matching `selector`
    async fn click(&self, selector: &str) -> Result<(), ScrapeError>;

    /// Serialized HTML of the live document
    async fn content(&self) -> Result<String, ScrapeError>;
}
