//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by a copy run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Scanning phase events
    Scan(ScanEvent),
    /// Transfer phase events
    Transfer(TransferEvent),
}

/// Events during the scanning phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { root: PathBuf },
    /// Scanning completed
    Completed { jobs: usize, already_copied: usize },
}

/// Events during the transfer phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TransferEvent {
    /// Workers are about to start
    Started {
        total_jobs: usize,
        already_copied: usize,
    },
    /// A file was copied and recorded
    FileCopied(TransferProgress),
    /// A job was abandoned; it stays pending for the next run
    JobSkipped { path: PathBuf, reason: String },
    /// Every worker has drained its chunk
    Completed { summary: TransferSummary },
}

/// Progress information after each committed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferProgress {
    /// Source file that was just copied
    pub path: PathBuf,
    /// Files committed so far in this run
    pub files_copied: u64,
    /// Bytes committed so far in this run
    pub bytes_copied: u64,
    /// Instantaneous throughput over the recent sample window
    pub bytes_per_second: Option<f64>,
    /// Estimated time left, in milliseconds
    pub eta_ms: Option<u64>,
}

/// Totals for a finished transfer phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferSummary {
    /// Files copied and recorded in the manifest
    pub files_copied: u64,
    /// Bytes written to the destination
    pub bytes_copied: u64,
    /// Jobs abandoned after a stat/open/create/copy/chtimes failure
    pub skipped: u64,
    /// Jobs dropped because their extension is excluded
    pub excluded: u64,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

impl TransferSummary {
    /// Average throughput in MiB per second
    pub fn megabytes_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        let seconds = self.duration_ms as f64 / 1000.0;
        (self.bytes_copied as f64 / 1024.0 / 1024.0) / seconds
    }
}
