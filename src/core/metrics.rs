//! Logger metrics for observability
//!
//! Counters for messages written, filtered by the threshold, and lost to
//! failing sinks. Recording never influences what is written.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use hiplog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.filtered_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Messages handed to a sink without error
    written: AtomicU64,

    /// Calls below the threshold, including every call under an unknown threshold
    filtered: AtomicU64,

    /// Messages whose composition or write returned an error
    failed: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Record a written message, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Total number of calls that reached the logger
    pub fn total_calls(&self) -> u64 {
        self.written_count() + self.filtered_count() + self.failed_count()
    }

    /// Share of failed messages among those that passed the threshold, in percent
    ///
    /// Returns 0.0 if nothing passed the threshold yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count() as f64;
        let attempted = self.written_count() as f64 + failed;
        if attempted == 0.0 {
            0.0
        } else {
            (failed / attempted) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            written: AtomicU64::new(self.written_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            failed: AtomicU64::new(self.failed_count()),
        }
    }
}
