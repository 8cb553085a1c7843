//! Headless Chrome backing for the scraper's [`Page`](crate::page::Page)
//!
//! # Example
//!
//! ```no_run
//! use schools_scraper::browser::{BrowserConfig, BrowserManager, ChromePage};
//! use schools_scraper::page::Page;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = BrowserManager::new(BrowserConfig::default())?;
//! let page = ChromePage::new(manager.new_tab()?);
//!
//! page.goto("https://example.com").await?;
//! let html = page.content().await?;
//!
//! println!("Extracted {} bytes of HTML", html.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod page;

pub use config::BrowserConfig;
pub use manager::{BrowserError, BrowserManager};
pub use page::ChromePage;
