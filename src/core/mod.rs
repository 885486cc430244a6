//! # Core Module
//!
//! The incremental transfer engine, independent of any terminal output.
//!
//! ## Modules
//! - `manifest` - Loads and appends the record of copied files
//! - `scanner` - Walks the source tree and diffs it against the manifest
//! - `metadata` - Reads capture times embedded in media files
//! - `classify` - Picks a file's routing class and destination
//! - `transfer` - Copies jobs on a fixed pool of workers
//! - `session` - Runs all of the above end to end

pub mod classify;
pub mod manifest;
pub mod metadata;
pub mod scanner;
pub mod session;
pub mod transfer;

// Re-export commonly used types
pub use classify::{FileClass, Router};
pub use manifest::{FileManifest, ManifestSink};
pub use metadata::{CaptureTimeExtractor, ExifExtractor};
pub use scanner::{ScanResult, SourceScanner};
pub use session::{SyncOptions, SyncOutcome, SyncSession};
pub use transfer::TransferEngine;
