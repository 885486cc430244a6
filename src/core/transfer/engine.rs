//! Worker pool that drains the job list.

use super::copier::copy_file;
use super::partition::partition;
use super::stats::TransferStats;
use crate::core::classify::Router;
use crate::core::manifest::{manifest_key, InMemoryManifest, ManifestSink};
use crate::core::metadata::{CaptureTimeExtractor, ExifExtractor};
use crate::error::{CopySortError, TransferError};
use crate::events::{
    null_sender, Event, EventSender, TransferEvent, TransferProgress, TransferSummary,
};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Worker count used when none is configured
pub const DEFAULT_WORKERS: usize = 8;

/// Configuration for the transfer engine
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Root that job paths are relative to
    pub source_root: PathBuf,
    /// Root of the destination tree
    pub dest_root: PathBuf,
    /// Number of parallel workers (and chunks)
    pub workers: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::new(),
            dest_root: PathBuf::new(),
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Builder for the transfer engine
pub struct TransferEngineBuilder {
    config: TransferConfig,
    manifest: Option<Box<dyn ManifestSink>>,
    extractor: Option<Arc<dyn CaptureTimeExtractor>>,
}

impl TransferEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: TransferConfig::default(),
            manifest: None,
            extractor: None,
        }
    }

    /// Set the source root
    pub fn source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.source_root = root.into();
        self
    }

    /// Set the destination root
    pub fn dest_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.dest_root = root.into();
        self
    }

    /// Set the number of workers
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set where completed paths are recorded
    pub fn manifest(mut self, manifest: Box<dyn ManifestSink>) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Set the capture-time extractor
    pub fn extractor(mut self, extractor: Arc<dyn CaptureTimeExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Build the engine. Defaults to an in-memory manifest and EXIF extraction.
    pub fn build(self) -> Result<TransferEngine, CopySortError> {
        if self.config.workers == 0 {
            return Err(CopySortError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }

        let extractor = self
            .extractor
            .unwrap_or_else(|| Arc::new(ExifExtractor::new()));

        Ok(TransferEngine {
            router: Router::new(self.config.dest_root.clone(), extractor),
            manifest: self
                .manifest
                .unwrap_or_else(|| Box::new(InMemoryManifest::new())),
            config: self.config,
        })
    }
}

impl Default for TransferEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened to one job that did not fail
enum JobOutcome {
    Copied { key: Vec<u8>, bytes: u64 },
    Excluded,
}

/// Copies jobs in parallel, recording each success in the manifest
pub struct TransferEngine {
    config: TransferConfig,
    router: Router,
    manifest: Box<dyn ManifestSink>,
}

impl TransferEngine {
    /// Create a new engine builder
    pub fn builder() -> TransferEngineBuilder {
        TransferEngineBuilder::new()
    }

    /// Run without events
    pub fn run(&self, jobs: &[PathBuf]) -> Result<TransferSummary, CopySortError> {
        self.run_with_events(jobs, 0, &null_sender())
    }

    /// Copy every job and wait for all workers.
    ///
    /// Jobs are split into fixed contiguous chunks up front, one per worker.
    /// A worker that finishes early does not help the others. Per-job
    /// failures never fail the run; they are counted in `skipped`.
    pub fn run_with_events(
        &self,
        jobs: &[PathBuf],
        already_copied: usize,
        events: &EventSender,
    ) -> Result<TransferSummary, CopySortError> {
        let start_time = Instant::now();

        events.send(Event::Transfer(TransferEvent::Started {
            total_jobs: jobs.len(),
            already_copied,
        }));

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("copy-worker-{}", i))
            .build()
            .map_err(|e| CopySortError::WorkerPool(e.to_string()))?;

        let stats = TransferStats::new();
        let chunks = partition(jobs, self.config.workers);

        tracing::info!(
            jobs = jobs.len(),
            workers = self.config.workers,
            chunks = chunks.len(),
            "starting transfer"
        );

        pool.install(|| {
            chunks
                .par_iter()
                .for_each(|chunk| self.drain_chunk(chunk, jobs.len(), &stats, events));
        });

        let summary = TransferSummary {
            files_copied: stats.files(),
            bytes_copied: stats.bytes(),
            skipped: stats.skipped(),
            excluded: stats.excluded(),
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        tracing::info!(
            files = summary.files_copied,
            bytes = summary.bytes_copied,
            skipped = summary.skipped,
            excluded = summary.excluded,
            "transfer complete"
        );

        events.send(Event::Transfer(TransferEvent::Completed {
            summary: summary.clone(),
        }));

        Ok(summary)
    }

    fn drain_chunk(
        &self,
        chunk: &[PathBuf],
        total_jobs: usize,
        stats: &TransferStats,
        events: &EventSender,
    ) {
        for source in chunk {
            match self.transfer_one(source) {
                Ok(JobOutcome::Copied { key, bytes }) => {
                    self.commit(source, &key, bytes, total_jobs, stats, events)
                }
                Ok(JobOutcome::Excluded) => stats.record_excluded(),
                Err(e) => {
                    tracing::debug!(path = %source.display(), error = %e, "job abandoned");
                    stats.record_skip();
                    events.send(Event::Transfer(TransferEvent::JobSkipped {
                        path: source.clone(),
                        reason: e.to_string(),
                    }));
                }
            }
        }
    }

    /// Stat, route and copy one file
    fn transfer_one(&self, source: &Path) -> Result<JobOutcome, TransferError> {
        let stat_error = |source_err: std::io::Error| TransferError::Stat {
            path: source.to_path_buf(),
            source: source_err,
        };

        let metadata = fs::metadata(source).map_err(stat_error)?;
        let modified = metadata.modified().map_err(stat_error)?;

        let relative = source
            .strip_prefix(&self.config.source_root)
            .map_err(|_| TransferError::OutsideRoot {
                path: source.to_path_buf(),
            })?;

        let destination = match self.router.route(source, relative, modified) {
            Some(dest) => dest,
            None => return Ok(JobOutcome::Excluded),
        };

        let bytes = copy_file(source, &destination, modified)?;

        Ok(JobOutcome::Copied {
            key: manifest_key(relative),
            bytes,
        })
    }

    fn commit(
        &self,
        source: &Path,
        key: &[u8],
        bytes: u64,
        total_jobs: usize,
        stats: &TransferStats,
        events: &EventSender,
    ) {
        let (files_copied, bytes_copied) = stats.record_copy(bytes);
        let remaining = total_jobs.saturating_sub(files_copied as usize);
        let throughput = stats.throughput(remaining);

        events.send(Event::Transfer(TransferEvent::FileCopied(TransferProgress {
            path: source.to_path_buf(),
            files_copied,
            bytes_copied,
            bytes_per_second: throughput.map(|t| t.bytes_per_second),
            eta_ms: throughput.map(|t| t.eta.as_millis() as u64),
        })));

        if let Err(e) = self.manifest.append(key) {
            tracing::warn!(
                path = %source.display(),
                error = %e,
                "copied but not recorded in manifest"
            );
        }
    }
}
