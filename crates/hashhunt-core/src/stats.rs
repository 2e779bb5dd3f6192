//! Live search statistics

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Counters shared between one search run and its progress reporter
#[derive(Debug)]
pub struct SearchStats {
    /// Candidates tested
    attempts: AtomicU64,
    /// Reporting intervals elapsed
    ticks: AtomicU64,
    start_time: Instant,
    /// Set by the reporter; the search loop answers by publishing a snapshot
    snapshot_requested: AtomicBool,
    snapshot: Mutex<Vec<u8>>,
}

impl SearchStats {
    /// Create new stats
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_attempts(&self, count: u64) {
        self.attempts.fetch_add(count, Ordering::Relaxed);
    }

    pub fn total_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Count one reporting interval, returning the new total
    pub fn tick(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Attempts per reporting interval, averaged over the run
    pub fn average_per_tick(&self) -> u64 {
        match self.ticks() {
            0 => 0,
            ticks => self.total_attempts() / ticks,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Attempts per wall-clock second
    pub fn attempts_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_attempts() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Ask the search loop for a fresh candidate snapshot
    pub fn request_snapshot(&self) {
        self.snapshot_requested.store(true, Ordering::Relaxed);
    }

    /// Consume a pending snapshot request
    pub fn snapshot_wanted(&self) -> bool {
        self.snapshot_requested.load(Ordering::Relaxed)
            && self.snapshot_requested.swap(false, Ordering::Relaxed)
    }

    pub fn publish_snapshot(&self, candidate: &[u8]) {
        if let Ok(mut snapshot) = self.snapshot.lock() {
            snapshot.clear();
            snapshot.extend_from_slice(candidate);
        }
    }

    /// Most recently published candidate
    pub fn snapshot(&self) -> Vec<u8> {
        self.snapshot
            .lock()
            .map(|snapshot| snapshot.clone())
            .unwrap_or_default()
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            attempts: AtomicU64::new(0),
            ticks: AtomicU64::new(0),
            start_time: Instant::now(),
            snapshot_requested: AtomicBool::new(false),
            snapshot: Mutex::new(Vec::new()),
        }
    }
}

/// Cooperative cancellation, checked once per search step
///
/// A cancelled token stays cancelled until [`CancelToken::reset`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Re-arm the token for another run
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}
