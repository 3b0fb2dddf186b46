//! Sink delivery metrics
//!
//! Sink failures never reach the caller, so these counters are the only way
//! to observe whether error records actually left the process.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the sink dispatcher
///
/// # Example
///
/// ```
/// use errlog::SinkMetrics;
///
/// let metrics = SinkMetrics::new();
/// metrics.record_delivered();
/// metrics.record_failed();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.failed(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct SinkMetrics {
    /// Error records handed to the dispatcher
    dispatched: AtomicU64,

    /// Sink deliveries that completed successfully
    delivered: AtomicU64,

    /// Sink deliveries that returned an error
    failed: AtomicU64,

    /// Sink tasks that panicked
    panicked: AtomicU64,
}

impl SinkMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            panicked: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn panicked(&self) -> u64 {
        self.panicked.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_panicked(&self) -> u64 {
        self.panicked.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of finished deliveries that failed or panicked, as a percentage
    ///
    /// Returns 0.0 if nothing has finished yet.
    pub fn failure_rate(&self) -> f64 {
        let bad = (self.failed() + self.panicked()) as f64;
        let total = self.delivered() as f64 + bad;
        if total == 0.0 {
            0.0
        } else {
            (bad / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.panicked.store(0, Ordering::Relaxed);
    }
}

impl Default for SinkMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SinkMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            delivered: AtomicU64::new(self.delivered()),
            failed: AtomicU64::new(self.failed()),
            panicked: AtomicU64::new(self.panicked()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = SinkMetrics::new();
        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.failed(), 0);
        assert_eq!(metrics.panicked(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = SinkMetrics::new();
        assert_eq!(metrics.record_failed(), 0);
        assert_eq!(metrics.record_failed(), 1);
        assert_eq!(metrics.failed(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = SinkMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivered();
        }
        for _ in 0..9 {
            metrics.record_failed();
        }
        metrics.record_panicked();

        let rate = metrics.failure_rate();
        assert!(rate > 9.9 && rate < 10.1, "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = SinkMetrics::new();
        metrics.record_dispatched();
        metrics.record_delivered();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(snapshot.dispatched(), 1);
        assert_eq!(snapshot.delivered(), 1);
    }
}
