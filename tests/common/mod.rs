//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{Local, TimeZone};
use filetime::FileTime;
use std::path::Path;

pub use copy_sort::core::metadata::jpeg_with_capture_time;

/// Local noon on the given day, as a file time
pub fn local_noon(year: i32, month: u32, day: u32) -> FileTime {
    let time = Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
    FileTime::from_system_time(time.into())
}

pub fn set_mtime(path: &Path, time: FileTime) {
    filetime::set_file_mtime(path, time).unwrap();
}

pub fn mtime_of(path: &Path) -> FileTime {
    FileTime::from_last_modification_time(&std::fs::metadata(path).unwrap())
}
