//! Discovery of school ids from the interactive listing page.

use crate::error::ScrapeError;
use crate::models::EntityId;
use crate::page::Page;
use crate::retry::execute_with_retry;
use crate::waiter::{parse_selector, wait_until, Readiness, WaitPolicy};
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

/// Control that reveals the full school list
pub const SHOW_ALL_BUTTON: &str = "#button_bs";
/// Present once the full list has rendered
pub const LISTING_READY: &str = "#schListNav-nav a.all";
/// Anchors carrying a school id in their onclick handler
pub const LISTING_LINKS: &str = "#schListNav a";

fn onclick_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\('(\d+)").expect("valid onclick id pattern"))
}

/// Extract the id embedded in an onclick handler such as `showSchool('4012')`
pub fn id_from_onclick(onclick: &str) -> Option<EntityId> {
    onclick_id_pattern()
        .captures(onclick)
        .and_then(|c| c.get(1))
        .map(|m| EntityId(m.as_str().to_string()))
}

/// Ids of every listing anchor, in document order.
///
/// Anchors without an onclick handler or whose handler carries no id are
/// skipped. Duplicates are kept.
pub fn parse_entity_ids(html: &str) -> Result<Vec<EntityId>, ScrapeError> {
    let document = Html::parse_document(html);
    let links = parse_selector(LISTING_LINKS)?;

    Ok(document
        .select(&links)
        .filter_map(|a| a.value().attr("onclick"))
        .filter_map(id_from_onclick)
        .collect())
}

/// Navigate to the listing page, reveal every school and collect their ids.
///
/// The whole load is one retried unit: a failed navigation, a listing that
/// never renders and a failed click all start over from a fresh navigation.
pub async fn discover_entities<P>(
    page: &P,
    listing_url: &str,
    retries: u32,
    wait: &WaitPolicy,
) -> Result<Vec<EntityId>, ScrapeError>
where
    P: Page + ?Sized,
{
    log::info!("Opening school listing: {}", listing_url);
    let ids = execute_with_retry(|| load_listing(page, listing_url, wait), retries)
        .await
        .ok_or_else(|| ScrapeError::NavigationExhausted {
            url: listing_url.to_string(),
        })?;

    log::debug!("Discovered ids: {:?}", ids);
    Ok(ids)
}

async fn load_listing<P>(
    page: &P,
    listing_url: &str,
    wait: &WaitPolicy,
) -> Result<Vec<EntityId>, ScrapeError>
where
    P: Page + ?Sized,
{
    page.goto(listing_url).await?;

    wait_until(page, &Readiness::present(SHOW_ALL_BUTTON), wait).await?;
    page.click(SHOW_ALL_BUTTON).await?;

    let html = wait_until(page, &Readiness::present(LISTING_READY), wait).await?;
    parse_entity_ids(&html)
}
