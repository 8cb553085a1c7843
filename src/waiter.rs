//! Readiness waits for client-rendered pages.
//!
//! A freshly navigated page is not readable until its scripts have rendered
//! the elements we extract from. Each page type declares a [`Readiness`]
//! predicate which is polled against snapshots of the live document until it
//! holds or the [`WaitPolicy`] deadline passes.

use crate::error::ScrapeError;
use crate::page::Page;
use scraper::{Html, Selector};
use std::fmt;
use std::time::{Duration, Instant};

/// Condition under which a page is considered loaded enough to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// At least one element matches the selector
    Present(String),
    /// Exactly `n` elements match the selector
    CountEquals(String, usize),
    /// More than `n` elements match the selector
    CountAbove(String, usize),
    /// Every inner condition holds on the same snapshot
    All(Vec<Readiness>),
}

impl Readiness {
    pub fn present(selector: &str) -> Self {
        Readiness::Present(selector.to_string())
    }

    pub fn count_equals(selector: &str, n: usize) -> Self {
        Readiness::CountEquals(selector.to_string(), n)
    }

    pub fn count_above(selector: &str, n: usize) -> Self {
        Readiness::CountAbove(selector.to_string(), n)
    }

    /// Evaluate the predicate against a parsed document
    pub fn is_satisfied(&self, document: &Html) -> Result<bool, ScrapeError> {
        let satisfied = match self {
            Readiness::Present(sel) => document.select(&parse_selector(sel)?).next().is_some(),
            Readiness::CountEquals(sel, n) => document.select(&parse_selector(sel)?).count() == *n,
            Readiness::CountAbove(sel, n) => document.select(&parse_selector(sel)?).count() > *n,
            Readiness::All(conditions) => {
                for condition in conditions {
                    if !condition.is_satisfied(document)? {
                        return Ok(false);
                    }
                }
                true
            }
        };
        Ok(satisfied)
    }

    /// Evaluate the predicate against serialized HTML
    pub fn is_satisfied_by(&self, html: &str) -> Result<bool, ScrapeError> {
        self.is_satisfied(&Html::parse_document(html))
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Present(sel) => write!(f, "'{}' present", sel),
            Readiness::CountEquals(sel, n) => write!(f, "exactly {} of '{}'", n, sel),
            Readiness::CountAbove(sel, n) => write!(f, "more than {} of '{}'", n, sel),
            Readiness::All(conditions) => {
                let parts: Vec<String> = conditions.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", parts.join(" and "))
            }
        }
    }
}

/// Deadline and polling cadence for readiness waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// Compile a CSS selector, mapping parse failures into [`ScrapeError`]
pub fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Poll `page` until `readiness` holds, returning the HTML snapshot that
/// satisfied it.
///
/// Errors reading the document while waiting are treated as "not ready yet".
/// Once `policy.timeout` has elapsed the wait fails with
/// [`ScrapeError::Timeout`].
pub async fn wait_until<P>(
    page: &P,
    readiness: &Readiness,
    policy: &WaitPolicy,
) -> Result<String, ScrapeError>
where
    P: Page + ?Sized,
{
    let start = Instant::now();

    loop {
        match page.content().await {
            Ok(html) => {
                if readiness.is_satisfied_by(&html)? {
                    return Ok(html);
                }
            }
            Err(e) => {
                log::debug!("Document not readable yet ({}): {}", readiness, e);
            }
        }

        if start.elapsed() >= policy.timeout {
            return Err(ScrapeError::Timeout {
                condition: readiness.to_string(),
                waited: start.elapsed(),
            });
        }

        tokio::time::sleep(policy.poll_interval).await;
    }
}
