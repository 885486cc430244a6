//! # Manifest Module
//!
//! Persists the set of source-relative paths that have already been copied.
//!
//! ## Format
//! One relative path per line, no header. Paths are stored as their raw
//! bytes, so names that are not valid UTF-8 survive a round trip. Entries are
//! only ever appended, so manifests from several runs can be concatenated.
//! Paths containing newlines are not escaped.
//!
//! ## Lifecycle
//! The manifest is loaded once at startup into a [`HashSet`]. During the run,
//! completions go only to a [`ManifestSink`]; the loaded set is never updated.

mod file;
mod memory;

pub use file::FileManifest;
pub use memory::InMemoryManifest;

use crate::error::ManifestError;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// File name used under the home directory when no manifest is given
pub const DEFAULT_MANIFEST_NAME: &str = ".copy_sort_manifest.txt";

/// Destination for completed relative paths.
///
/// Implementations are shared by every worker and must serialize appends.
pub trait ManifestSink: Send + Sync {
    /// Record one manifest key. The entry must be durable once this returns.
    fn append(&self, key: &[u8]) -> Result<(), ManifestError>;
}

/// Load every entry from a manifest file.
///
/// A missing or unreadable manifest yields an empty set: a first run has no
/// history. A line that fails to read is skipped; the rest still load.
/// A trailing `\r` is dropped so CRLF manifests match.
pub fn load_manifest(path: &Path) -> HashSet<Vec<u8>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no manifest loaded");
            return HashSet::new();
        }
    };

    BufReader::new(file)
        .split(b'\n')
        .filter_map(|line| line.ok())
        .map(|mut line| {
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            line
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Default manifest location: `$HOME/.copy_sort_manifest.txt`
pub fn default_manifest_path() -> Result<PathBuf, ManifestError> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_MANIFEST_NAME))
        .ok_or(ManifestError::HomeDirUnavailable)
}

/// Manifest key for a path relative to the source root.
///
/// The key is the path's exact bytes, so two distinct names never collide.
pub fn manifest_key(relative: &Path) -> Vec<u8> {
    relative.as_os_str().as_encoded_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_loads_empty() {
        let set = load_manifest(Path::new("/nonexistent/manifest.txt"));
        assert!(set.is_empty());
    }

    #[test]
    fn load_reads_one_entry_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manifest.txt");
        fs::write(&path, "a/b.jpg\ndocs/notes.txt\na/b.jpg\n").unwrap();

        let set = load_manifest(&path);

        assert_eq!(set.len(), 2);
        assert!(set.contains(b"a/b.jpg".as_slice()));
        assert!(set.contains(b"docs/notes.txt".as_slice()));
    }

    #[test]
    fn load_ignores_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manifest.txt");
        fs::write(&path, "one.txt\n\n\ntwo.txt").unwrap();

        let set = load_manifest(&path);

        assert_eq!(set.len(), 2);
        assert!(!set.contains(b"".as_slice()));
    }

    #[test]
    fn load_strips_carriage_returns() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manifest.txt");
        fs::write(&path, "one.txt\r\ntwo.txt\r\n").unwrap();

        let set = load_manifest(&path);

        assert!(set.contains(b"one.txt".as_slice()));
        assert!(set.contains(b"two.txt".as_slice()));
    }

    #[test]
    fn invalid_utf8_line_does_not_hide_later_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manifest.txt");
        fs::write(&path, b"a.txt\n\xff\nb.txt\nc.txt\n").unwrap();

        let set = load_manifest(&path);

        assert_eq!(set.len(), 4);
        assert!(set.contains(b"\xff".as_slice()));
        assert!(set.contains(b"b.txt".as_slice()));
        assert!(set.contains(b"c.txt".as_slice()));
    }

    #[test]
    fn directory_as_manifest_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_manifest(temp_dir.path()).is_empty());
    }

    #[test]
    fn default_path_uses_dotfile_name() {
        if let Ok(path) = default_manifest_path() {
            assert!(path.ends_with(DEFAULT_MANIFEST_NAME));
        }
    }

    #[test]
    fn manifest_key_is_relative_path_bytes() {
        let key = manifest_key(&Path::new("docs").join("notes.txt"));
        assert!(key.starts_with(b"docs"));
        assert!(key.ends_with(b"notes.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_get_distinct_keys() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let first = manifest_key(Path::new(OsStr::from_bytes(b"\xff.txt")));
        let second = manifest_key(Path::new(OsStr::from_bytes(b"\xfe.txt")));

        assert_ne!(first, second);
        assert_eq!(first, b"\xff.txt");
    }
}
