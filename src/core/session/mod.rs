//! # Session Module
//!
//! One complete run: load the manifest, scan, and copy what is pending.
//!
//! The manifest is only opened for writing when there is work to do, so a
//! run with nothing pending leaves it untouched.

use crate::core::manifest::{load_manifest, FileManifest};
use crate::core::metadata::{CaptureTimeExtractor, ExifExtractor};
use crate::core::scanner::{ScanConfig, SourceScanner};
use crate::core::transfer::{TransferEngine, DEFAULT_WORKERS};
use crate::error::Result;
use crate::events::{null_sender, EventSender, TransferSummary};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub manifest_path: PathBuf,
    pub workers: usize,
}

impl SyncOptions {
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
        manifest_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            manifest_path: manifest_path.into(),
            workers: DEFAULT_WORKERS,
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Every scanned file was already in the manifest
    NothingToDo { already_copied: usize },
    /// Workers ran to completion
    Completed {
        already_copied: usize,
        summary: TransferSummary,
    },
}

/// Incremental copy from one source tree to one destination tree
pub struct SyncSession {
    options: SyncOptions,
    extractor: Arc<dyn CaptureTimeExtractor>,
}

impl SyncSession {
    pub fn new(options: SyncOptions) -> Self {
        Self {
            options,
            extractor: Arc::new(ExifExtractor::new()),
        }
    }

    /// Replace the capture-time extractor
    pub fn with_extractor(mut self, extractor: Arc<dyn CaptureTimeExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Run without events
    pub fn run(&self) -> Result<SyncOutcome> {
        self.run_with_events(&null_sender())
    }

    /// Run, reporting scan and transfer progress through `events`
    pub fn run_with_events(&self, events: &EventSender) -> Result<SyncOutcome> {
        let options = &self.options;
        let copied = load_manifest(&options.manifest_path);

        let scan = SourceScanner::new(ScanConfig::new(&options.source_root))
            .scan_with_events(&copied, events);

        if scan.is_done() {
            return Ok(SyncOutcome::NothingToDo {
                already_copied: scan.already_copied,
            });
        }

        let manifest = FileManifest::open(&options.manifest_path)?;

        let engine = TransferEngine::builder()
            .source_root(&options.source_root)
            .dest_root(&options.dest_root)
            .workers(options.workers)
            .manifest(Box::new(manifest))
            .extractor(Arc::clone(&self.extractor))
            .build()?;

        let summary = engine.run_with_events(&scan.jobs, scan.already_copied, events)?;

        Ok(SyncOutcome::Completed {
            already_copied: scan.already_copied,
            summary,
        })
    }
}
