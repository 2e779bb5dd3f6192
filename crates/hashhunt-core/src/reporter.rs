//! Background progress reporting
//!
//! One reporter thread per search call. It is stopped and joined when the
//! search returns, or when the handle is dropped.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};

use crate::stats::SearchStats;

/// One progress report: `<algorithm> ~<avg>/s <candidate>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressLine {
    pub algorithm: String,
    /// Attempts per second, averaged over the run
    pub average: u64,
    /// Recently tested candidate
    pub candidate: String,
}

impl fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~{}/s {}", self.algorithm, self.average, self.candidate)
    }
}

/// Receives every progress line
pub type ProgressSink = Arc<dyn Fn(&ProgressLine) + Send + Sync>;

/// Sink writing each line to stderr
pub fn stderr_sink() -> ProgressSink {
    Arc::new(|line: &ProgressLine| eprintln!("{line}"))
}

// Scale a per-interval count to a per-second rate
fn per_second(per_tick: u64, interval: Duration) -> u64 {
    let micros = interval.as_micros().max(1);
    u64::try_from(u128::from(per_tick) * 1_000_000 / micros).unwrap_or(u64::MAX)
}

/// Handle to a running reporter thread
pub struct ProgressReporter {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Start reporting on `stats` every `interval`
    pub fn spawn(
        stats: Arc<SearchStats>,
        algorithm: String,
        interval: Duration,
        sink: ProgressSink,
    ) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        stats.request_snapshot();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    stats.tick();
                    let line = ProgressLine {
                        algorithm: algorithm.clone(),
                        average: per_second(stats.average_per_tick(), interval),
                        candidate: String::from_utf8_lossy(&stats.snapshot()).into_owned(),
                    };
                    stats.request_snapshot();
                    sink(&line);
                }
                // Stop signal or handle dropped
                _ => break,
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Signal the thread and wait for it to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
