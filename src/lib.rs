// Library interface for schools_scraper
// The binary and the integration tests drive the scraper through these modules

pub mod browser;
pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod extract;
pub mod logging;
pub mod lookup;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod page;
pub mod retry;
pub mod waiter;

pub use error::ScrapeError;
pub use models::{BatchResult, EntityId, SchoolRecord};
pub use orchestrator::{run_batch, scrape, ScrapeOptions};
