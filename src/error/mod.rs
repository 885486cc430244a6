//! # Error Module
//!
//! Error types for the incremental copier.
//!
//! ## Taxonomy
//! - **Fatal** - manifest and worker pool failures stop the run before anything is copied
//! - **Per job** - [`TransferError`] abandons one file; the next run retries it
//! - **Metadata** - [`MetadataError`] is always recovered by falling back to mtime

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum CopySortError {
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised by the manifest store
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Could not resolve the home directory. Pass --manifest to choose a location.")]
    HomeDirUnavailable,

    #[error("Failed to open manifest {path} for append: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to append to manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest writer lock was poisoned by a panicking worker")]
    LockPoisoned,
}

/// Errors while reading capture-time metadata from a media file
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No capture time found in {path}")]
    NoMetadata { path: PathBuf },

    #[error("Unparseable capture time {value:?} in {path}")]
    InvalidTimestamp { path: PathBuf, value: String },
}

/// Errors that abandon a single transfer job
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Failed to stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not inside the source root")]
    OutsideRoot { path: PathBuf },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open source {path}: {source}")]
    OpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create destination {path}: {source}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed copying into {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to set timestamps on {path}: {source}")]
    SetTimes {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, CopySortError>;
