//! Directory walking implementation using walkdir.

use super::filter::PathFilter;
use super::ScanResult;
use crate::core::manifest::manifest_key;
use crate::events::{Event, EventSender, ScanEvent};
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Configuration for the source scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root of the source tree
    pub source_root: PathBuf,
    /// Exclusion rules
    pub filter: PathFilter,
}

impl ScanConfig {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            filter: PathFilter::new(),
        }
    }
}

/// Walks the source tree and diffs it against the loaded manifest
pub struct SourceScanner {
    config: ScanConfig,
}

impl SourceScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan without progress events
    pub fn scan(&self, copied: &HashSet<Vec<u8>>) -> ScanResult {
        self.scan_with_events(copied, &crate::events::null_sender())
    }

    /// Enumerate pending jobs.
    ///
    /// Unreadable entries are skipped without a report, so a missing source
    /// root simply produces no jobs. Anything that is not a directory is
    /// treated as a file.
    pub fn scan_with_events(&self, copied: &HashSet<Vec<u8>>, events: &EventSender) -> ScanResult {
        let root = &self.config.source_root;
        let filter = &self.config.filter;

        events.send(Event::Scan(ScanEvent::Started { root: root.clone() }));

        let mut jobs = Vec::new();
        let mut already_copied = 0;

        // Excluded directories are pruned; every file below them would match too
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !filter.is_excluded(entry.path()))
            .filter_map(|entry| entry.ok());

        for entry in walker {
            if entry.file_type().is_dir() {
                continue;
            }

            let relative = match entry.path().strip_prefix(root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };

            if copied.contains(&manifest_key(relative)) {
                already_copied += 1;
            } else {
                jobs.push(entry.into_path());
            }
        }

        tracing::info!(
            root = %root.display(),
            jobs = jobs.len(),
            already_copied,
            "scan complete"
        );

        events.send(Event::Scan(ScanEvent::Completed {
            jobs: jobs.len(),
            already_copied,
        }));

        ScanResult {
            jobs,
            already_copied,
        }
    }
}
