//! In-memory manifest sink for tests and dry runs.

use super::ManifestSink;
use crate::error::ManifestError;
use std::sync::Mutex;

/// Manifest that keeps appended entries in memory
#[derive(Default)]
pub struct InMemoryManifest {
    entries: Mutex<Vec<Vec<u8>>>,
}

impl InMemoryManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries recorded so far, in append order
    pub fn entries(&self) -> Vec<Vec<u8>> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl ManifestSink for InMemoryManifest {
    fn append(&self, key: &[u8]) -> Result<(), ManifestError> {
        self.entries
            .lock()
            .map_err(|_| ManifestError::LockPoisoned)?
            .push(key.to_vec());
        Ok(())
    }
}
