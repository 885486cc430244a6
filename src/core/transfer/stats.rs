//! Shared counters and the rolling throughput window.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Number of recent samples kept for rate and ETA estimates
pub const SAMPLE_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy)]
struct Sample {
    at: Instant,
    total_bytes: u64,
}

/// Rate and ETA derived from the sample window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throughput {
    pub bytes_per_second: f64,
    pub eta: Duration,
}

/// Counters updated by every worker
#[derive(Debug, Default)]
pub struct TransferStats {
    files: AtomicU64,
    bytes: AtomicU64,
    skipped: AtomicU64,
    excluded: AtomicU64,
    samples: Mutex<VecDeque<Sample>>,
}

impl TransferStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a committed file; returns the new `(files, bytes)` totals
    pub fn record_copy(&self, bytes: u64) -> (u64, u64) {
        self.record_copy_at(bytes, Instant::now())
    }

    fn record_copy_at(&self, bytes: u64, at: Instant) -> (u64, u64) {
        let total_bytes = self.bytes.fetch_add(bytes, Ordering::SeqCst) + bytes;
        let files = self.files.fetch_add(1, Ordering::SeqCst) + 1;

        if let Ok(mut samples) = self.samples.lock() {
            samples.push_back(Sample { at, total_bytes });
            while samples.len() > SAMPLE_WINDOW {
                samples.pop_front();
            }
        }

        (files, total_bytes)
    }

    pub fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_excluded(&self) {
        self.excluded.fetch_add(1, Ordering::SeqCst);
    }

    pub fn files(&self) -> u64 {
        self.files.load(Ordering::SeqCst)
    }

    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::SeqCst)
    }

    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::SeqCst)
    }

    pub fn excluded(&self) -> u64 {
        self.excluded.load(Ordering::SeqCst)
    }

    /// Rate between the oldest and newest sample, and the time left for
    /// `remaining` files at the window's average per-file interval.
    /// `None` until two samples a measurable time apart exist.
    pub fn throughput(&self, remaining: usize) -> Option<Throughput> {
        let samples = self.samples.lock().ok()?;
        if samples.len() < 2 {
            return None;
        }
        let first = samples.front()?;
        let last = samples.back()?;

        let elapsed = last.at.duration_since(first.at).as_secs_f64();
        if elapsed <= 0.0 {
            return None;
        }

        let delta_bytes = last.total_bytes.saturating_sub(first.total_bytes) as f64;
        let per_file = elapsed / (samples.len() - 1) as f64;

        Some(Throughput {
            bytes_per_second: delta_bytes / elapsed,
            eta: Duration::from_secs_f64(per_file * remaining as f64),
        })
    }
}
