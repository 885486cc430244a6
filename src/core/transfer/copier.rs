//! Single-file copy with modification time preservation.

use crate::error::TransferError;
use filetime::FileTime;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Copy `src` to `dst`, creating parent directories and truncating any
/// existing destination, then stamp `dst` with `modified` as both access
/// and modification time.
///
/// A failed copy may leave a partial destination behind; the next attempt
/// truncates it.
pub fn copy_file(src: &Path, dst: &Path, modified: SystemTime) -> Result<u64, TransferError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|source| TransferError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut input = File::open(src).map_err(|source| TransferError::OpenSource {
        path: src.to_path_buf(),
        source,
    })?;

    let mut output = File::create(dst).map_err(|source| TransferError::CreateDestination {
        path: dst.to_path_buf(),
        source,
    })?;

    let copied = io::copy(&mut input, &mut output).map_err(|source| TransferError::Copy {
        path: dst.to_path_buf(),
        source,
    })?;
    drop(output);

    let stamp = FileTime::from_system_time(modified);
    filetime::set_file_times(dst, stamp, stamp).map_err(|source| TransferError::SetTimes {
        path: dst.to_path_buf(),
        source,
    })?;

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn copies_bytes_and_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in.bin");
        fs::write(&src, b"hello world").unwrap();
        let dst = temp_dir.path().join("out/nested/deeper/in.bin");

        let copied = copy_file(&src, &dst, SystemTime::now()).unwrap();

        assert_eq!(copied, 11);
        assert_eq!(fs::read(&dst).unwrap(), b"hello world");
    }

    #[test]
    fn stamps_destination_with_source_mtime() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in.txt");
        fs::write(&src, b"x").unwrap();
        let dst = temp_dir.path().join("out.txt");
        let mtime = UNIX_EPOCH + Duration::from_secs(1_609_459_200);

        copy_file(&src, &dst, mtime).unwrap();

        let meta = fs::metadata(&dst).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta).unix_seconds(), 1_609_459_200);
        assert_eq!(FileTime::from_last_access_time(&meta).unix_seconds(), 1_609_459_200);
    }

    #[test]
    fn truncates_existing_destination() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("short.txt");
        fs::write(&src, b"new").unwrap();
        let dst = temp_dir.path().join("dst.txt");
        fs::write(&dst, b"a much longer partial leftover").unwrap();

        copy_file(&src, &dst, SystemTime::now()).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn missing_source_is_an_open_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = copy_file(
            &temp_dir.path().join("missing"),
            &temp_dir.path().join("dst"),
            SystemTime::now(),
        );
        assert!(matches!(result, Err(TransferError::OpenSource { .. })));
    }

    #[test]
    fn parent_blocked_by_file_is_a_create_dir_error() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in.txt");
        fs::write(&src, b"x").unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"file, not dir").unwrap();

        let result = copy_file(&src, &blocker.join("out.txt"), SystemTime::now());

        assert!(matches!(result, Err(TransferError::CreateDir { .. })));
    }
}
