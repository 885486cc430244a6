//! Append-only manifest file shared by all workers.

use super::ManifestSink;
use crate::error::ManifestError;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Manifest backed by a file opened in append mode.
///
/// Each append takes the lock, writes one line and flushes before
/// releasing, so a killed process loses at most the line in flight.
pub struct FileManifest {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileManifest {
    /// Open (creating if needed) the manifest for appending
    pub fn open(path: &Path) -> Result<Self, ManifestError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| ManifestError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

}

impl ManifestSink for FileManifest {
    fn append(&self, key: &[u8]) -> Result<(), ManifestError> {
        let mut writer = self.writer.lock().map_err(|_| ManifestError::LockPoisoned)?;

        writer
            .write_all(key)
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush())
            .map_err(|source| ManifestError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::load_manifest;
    use std::fs;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn append_is_visible_on_disk_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manifest.txt");
        let manifest = FileManifest::open(&path).unwrap();

        manifest.append(b"photos/a.jpg").unwrap();

        // Still open: the flush must already have reached the file
        assert_eq!(fs::read_to_string(&path).unwrap(), "photos/a.jpg\n");
    }

    #[test]
    fn open_appends_to_existing_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manifest.txt");
        fs::write(&path, "old.txt\n").unwrap();

        FileManifest::open(&path).unwrap().append(b"new.txt").unwrap();

        let set = load_manifest(&path);
        assert!(set.contains(b"old.txt".as_slice()));
        assert!(set.contains(b"new.txt".as_slice()));
    }

    #[test]
    fn raw_bytes_are_written_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manifest.txt");
        let manifest = FileManifest::open(&path).unwrap();

        manifest.append(b"\xff.txt").unwrap();
        manifest.append(b"\xfe.txt").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"\xff.txt\n\xfe.txt\n");
        assert_eq!(load_manifest(&path).len(), 2);
    }

    #[test]
    fn open_fails_when_parent_is_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("manifest.txt");

        let result = FileManifest::open(&path);

        assert!(matches!(result, Err(ManifestError::Open { .. })));
    }

    #[test]
    fn concurrent_appends_keep_lines_intact() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manifest.txt");
        let manifest = Arc::new(FileManifest::open(&path).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let manifest = Arc::clone(&manifest);
                thread::spawn(move || {
                    for i in 0..50 {
                        manifest
                            .append(format!("w{}/file{}.txt", worker, i).as_bytes())
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 400);
        assert_eq!(load_manifest(&path).len(), 400);
    }
}
