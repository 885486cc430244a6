//! # Scanner Module
//!
//! Walks the source tree and produces the jobs for this run.
//!
//! A file becomes a job unless its path contains `RECYCLE.BIN` or its
//! source-relative path is already in the manifest. Manifest hits are
//! counted so progress can start from where the last run stopped.
//!
//! ## Example
//! ```rust,ignore
//! let copied = load_manifest(&manifest_path);
//! let result = SourceScanner::new(ScanConfig::new("/media/card")).scan(&copied);
//! println!("{} pending, {} done", result.jobs.len(), result.already_copied);
//! ```

mod filter;
mod walker;

pub use filter::{PathFilter, RECYCLE_BIN_MARKER};
pub use walker::{ScanConfig, SourceScanner};

use std::path::PathBuf;

/// Output of a scan
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Absolute source paths still to copy, in traversal order
    pub jobs: Vec<PathBuf>,
    /// Files skipped because the manifest already lists them
    pub already_copied: usize,
}

impl ScanResult {
    /// True when nothing is left to copy
    pub fn is_done(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_jobs_are_not_done() {
        let result = ScanResult {
            jobs: vec![PathBuf::from("/src/a"), PathBuf::from("/src/b")],
            already_copied: 3,
        };
        assert!(!result.is_done());
    }

    #[test]
    fn empty_result_is_done() {
        assert!(ScanResult::default().is_done());
    }
}
