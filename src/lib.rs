//! # Copy Sort
//!
//! Incremental, resumable, parallel copying from a source tree to a
//! destination tree. Photos and videos are sorted into
//! `sorted_photos/YYYY/MM/DD/` by capture date; everything else keeps its
//! relative path.
//!
//! ## Resumability
//! Every copied file is appended to a manifest and flushed immediately.
//! A later run skips whatever the manifest lists, so an interrupted run
//! simply continues where it stopped.
//!
//! ## Architecture
//! - `core` - Scanner, classifier, worker pool, manifest
//! - `events` - Progress events for whatever renders them
//! - `error` - Error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{CopySortError, Result};

/// Initialize tracing for the library
///
/// Output is controlled by `RUST_LOG` and is silent by default.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}
