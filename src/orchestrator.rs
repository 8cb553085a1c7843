//! Drives a whole run: discovery, then extraction of every school in turn.
//!
//! All navigation happens on one page, one school at a time. A school whose
//! extraction fails after every retry leaves a `None` slot and the batch moves
//! on; only failures outside extraction (browser launch, discovery) end the
//! run early.

use crate::browser::{BrowserConfig, BrowserManager, ChromePage};
use crate::config::Config;
use crate::discovery::discover_entities;
use crate::error::ScrapeError;
use crate::export::{export, ExportFormat};
use crate::extract::{extract_details, DetailPages};
use crate::metrics::RunMetrics;
use crate::models::BatchResult;
use crate::page::Page;
use crate::retry::execute_with_retry;
use std::path::PathBuf;
use std::time::Instant;

/// Everything a run needs
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub listing_url: String,
    pub pages: DetailPages,
    pub browser: BrowserConfig,
    pub output: Option<PathBuf>,
    pub format: ExportFormat,
}

impl ScrapeOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            listing_url: config.site.listing_url.clone(),
            pages: config.detail_pages(),
            browser: config.browser.browser_config(),
            output: config.scrape.output.clone(),
            format: config.scrape.format,
        }
    }
}

/// Discover every school and extract each one on `page`.
///
/// Each school's two-phase extraction is retried as a unit with the same
/// retry count used for navigations, so a failure in the contact phase
/// restarts from the overview page.
pub async fn run_batch<P>(
    page: &P,
    listing_url: &str,
    pages: &DetailPages,
) -> Result<BatchResult, ScrapeError>
where
    P: Page + ?Sized,
{
    let mut metrics = RunMetrics::new();

    let ids = discover_entities(page, listing_url, pages.retries, &pages.wait).await?;
    log::info!("Scraping {} schools", ids.len());
    metrics.record_discovered(ids.len());

    let mut records = Vec::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        let started = Instant::now();
        let record = execute_with_retry(|| extract_details(page, id, pages), pages.retries).await;

        match record {
            Some(_) => metrics.record_success(started.elapsed()),
            None => {
                log::debug!("School {} ({}/{}) yielded no record", id, index + 1, ids.len());
                metrics.record_failure();
            }
        }
        records.push(record);
    }

    metrics.finish();
    log::info!("{}", metrics.summary());

    Ok(BatchResult { records, metrics })
}

/// Launch a browser, scrape every school and export when an output is set.
///
/// The browser is closed before this returns, whether the run succeeded or
/// not. The in-memory batch is returned either way.
pub async fn scrape(options: &ScrapeOptions) -> Result<BatchResult, ScrapeError> {
    let batch = run_in_browser(options).await?;

    if let Some(path) = &options.output {
        export(&batch, path, options.format)?;
    }

    Ok(batch)
}

/// Chrome lives only for the duration of this call
async fn run_in_browser(options: &ScrapeOptions) -> Result<BatchResult, ScrapeError> {
    let manager = BrowserManager::new(options.browser.clone())?;
    let page = ChromePage::new(manager.new_tab()?);

    run_batch(&page, &options.listing_url, &options.pages).await
}
