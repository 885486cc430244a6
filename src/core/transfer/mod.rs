//! # Transfer Module
//!
//! Parallel copy of the scanned job list.
//!
//! ## Per job
//! stat -> classify and route -> create parents -> copy -> set times ->
//! update counters and progress -> append to manifest.
//!
//! Any failure before the manifest append abandons the job silently; since
//! it never reaches the manifest, the next run picks it up again.
//!
//! ## Shared state
//! - Byte and file counters (atomics)
//! - Rolling window of the last 20 throughput samples (mutex)
//! - Manifest writer (mutex, flushed per entry)

mod copier;
mod engine;
mod partition;
mod stats;

pub use copier::copy_file;
pub use engine::{TransferConfig, TransferEngine, TransferEngineBuilder, DEFAULT_WORKERS};
pub use partition::partition;
pub use stats::{Throughput, TransferStats, SAMPLE_WINDOW};
