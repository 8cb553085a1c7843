//! Metrics for a scrape run
//!
//! Tracks how many schools were discovered, extracted and lost, and how long
//! the run took.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub discovered: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub total_extraction_time_ms: u64,
    pub average_extraction_time_ms: f64,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            discovered: 0,
            succeeded: 0,
            failed: 0,
            total_extraction_time_ms: 0,
            average_extraction_time_ms: 0.0,
        }
    }

    pub fn record_discovered(&mut self, count: usize) {
        self.discovered = count as u64;
    }

    pub fn record_success(&mut self, elapsed: Duration) {
        self.succeeded += 1;
        self.total_extraction_time_ms += elapsed.as_millis() as u64;
        self.average_extraction_time_ms =
            self.total_extraction_time_ms as f64 / self.succeeded as f64;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn processed(&self) -> u64 {
        self.succeeded + self.failed
    }

    pub fn success_rate(&self) -> f64 {
        if self.processed() == 0 {
            0.0
        } else {
            (self.succeeded as f64 / self.processed() as f64) * 100.0
        }
    }

    /// Wall-clock duration of the run, up to now if it has not finished
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }

    pub fn summary(&self) -> String {
        format!(
            "Scraped {}/{} schools ({} failed, {:.2}% success) in {}s, avg {:.0}ms per school",
            self.succeeded,
            self.discovered,
            self.failed,
            self.success_rate(),
            self.elapsed().num_seconds(),
            self.average_extraction_time_ms
        )
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = RunMetrics::new();
        assert_eq!(metrics.discovered, 0);
        assert_eq!(metrics.processed(), 0);
        assert_eq!(metrics.success_rate(), 0.0);
        assert!(metrics.finished_at.is_none());
    }

    #[test]
    fn test_record_success() {
        let mut metrics = RunMetrics::new();
        metrics.record_success(Duration::from_millis(100));
        metrics.record_success(Duration::from_millis(300));

        assert_eq!(metrics.succeeded, 2);
        assert_eq!(metrics.total_extraction_time_ms, 400);
        assert_eq!(metrics.average_extraction_time_ms, 200.0);
    }

    #[test]
    fn test_success_rate_calculation() {
        let mut metrics = RunMetrics::new();
        metrics.record_discovered(3);
        metrics.record_success(Duration::from_millis(100));
        metrics.record_failure();
        metrics.record_success(Duration::from_millis(200));

        assert_eq!(metrics.processed(), 3);
        assert!((metrics.success_rate() - 66.66).abs() < 0.1);
    }

    #[test]
    fn test_summary() {
        let mut metrics = RunMetrics::new();
        metrics.record_discovered(2);
        metrics.record_success(Duration::from_millis(50));
        metrics.record_failure();
        metrics.finish();

        let summary = metrics.summary();
        assert!(summary.starts_with("Scraped 1/2 schools (1 failed, 50.00% success)"));
        assert!(metrics.elapsed() >= chrono::Duration::zero());
    }
}
