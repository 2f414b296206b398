//! Process-lifetime relay statistics.
//!
//! A single [`RelayStats`] instance is created at startup and shared behind
//! `Arc` by every command handler. Counters are atomic because the dispatcher
//! handles updates concurrently; they only ever increase and reset with the
//! process.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// Shared counters for emote relay outcomes.
#[derive(Debug)]
pub struct RelayStats {
    total_requests: AtomicU64,
    successful: AtomicU64,
    failed: AtomicU64,
    started_at: DateTime<Utc>,
}

/// Point-in-time view of the counters, taken for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_requests: u64,
    pub successful: u64,
    pub failed: u64,
    pub started_at: DateTime<Utc>,
}

impl RelayStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            successful: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            started_at: Utc::now(),
        }
    }

    /// Record that a well-formed send request was accepted, before the
    /// fetch is attempted.
    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful send outcome.
    pub fn record_success(&self) {
        self.successful.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed send outcome.
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful: self.successful.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            started_at: self.started_at,
        }
    }
}

impl Default for RelayStats {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsSnapshot {
    /// Percentage of successful sends, `0.0` when nothing was sent yet.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.successful as f64 / self.total_requests as f64 * 100.0
    }

    /// Uptime relative to `now`, formatted as `XhYmZs`-style text.
    #[must_use]
    pub fn uptime_text(&self, now: DateTime<Utc>) -> String {
        let total_seconds = (now - self.started_at).num_seconds().max(0);
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        format!("{hours}h {minutes}m {seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn counters_start_at_zero() {
        let snapshot = RelayStats::new().snapshot();
        assert_eq!(snapshot.total_requests, 0);
        assert_eq!(snapshot.successful, 0);
        assert_eq!(snapshot.failed, 0);
    }

    #[test]
    fn total_equals_successful_plus_failed() {
        let stats = RelayStats::new();
        for outcome_ok in [true, false, true, true, false] {
            stats.record_request();
            if outcome_ok {
                stats.record_success();
            } else {
                stats.record_failure();
            }
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_requests, 5);
        assert_eq!(snapshot.successful, 3);
        assert_eq!(snapshot.failed, 2);
        assert_eq!(
            snapshot.total_requests,
            snapshot.successful + snapshot.failed
        );
    }

    #[test]
    fn success_rate_guards_division_by_zero() {
        let snapshot = RelayStats::new().snapshot();
        assert_eq!(snapshot.success_rate(), 0.0);
    }

    #[test]
    fn success_rate_is_a_percentage() {
        let stats = RelayStats::new();
        for _ in 0..4 {
            stats.record_request();
        }
        stats.record_success();
        stats.record_success();
        stats.record_success();
        stats.record_failure();

        assert!((stats.snapshot().success_rate() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn increments_are_safe_across_threads() {
        let stats = std::sync::Arc::new(RelayStats::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = stats.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.record_request();
                        stats.record_success();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_requests, 800);
        assert_eq!(snapshot.successful, 800);
    }

    #[test]
    fn uptime_formats_hours_minutes_seconds() {
        let stats = RelayStats::new();
        let snapshot = stats.snapshot();
        let later = snapshot.started_at + Duration::seconds(3 * 3600 + 7 * 60 + 12);
        assert_eq!(snapshot.uptime_text(later), "3h 7m 12s");
    }

    #[test]
    fn uptime_clamps_clock_skew_to_zero() {
        let stats = RelayStats::new();
        let snapshot = stats.snapshot();
        let earlier = snapshot.started_at - Duration::seconds(30);
        assert_eq!(snapshot.uptime_text(earlier), "0h 0m 0s");
    }
}
