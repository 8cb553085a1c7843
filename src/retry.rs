//! Bounded retry of fallible async operations.
//!
//! The executor never propagates the failure of its operation: once every
//! attempt has failed it returns `None`, and the caller decides whether that
//! is fatal for the step it was performing.

use std::fmt::Display;
use std::future::Future;

/// Run `operation` until it succeeds, at most `max_retries + 1` times.
///
/// There is no delay between attempts. `max_retries == 0` means a single
/// attempt. Returns `None` when every attempt failed.
///
/// ```
/// use schools_scraper::retry::execute_with_retry;
///
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// # rt.block_on(async {
/// let value = execute_with_retry(|| async { Ok::<_, String>(42) }, 3).await;
/// assert_eq!(value, Some(42));
/// # });
/// ```
pub async fn execute_with_retry<T, E, F, Fut>(mut operation: F, max_retries: u32) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let total_attempts = max_retries as u64 + 1;

    for attempt in 1..=total_attempts {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    log::debug!("Succeeded on attempt {}/{}", attempt, total_attempts);
                }
                return Some(value);
            }
            Err(e) => {
                log::warn!("Attempt {}/{} failed: {}", attempt, total_attempts, e);
            }
        }
    }

    log::warn!("Giving up after {} attempts", total_attempts);
    None
}
