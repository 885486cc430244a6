//! # Classify Module
//!
//! Decides what happens to each source file and where it lands.
//!
//! | Class      | Extensions                                  | Destination                                   |
//! |------------|---------------------------------------------|-----------------------------------------------|
//! | `Media`    | jpg, jpeg, mp4, mov, avi, 3gp               | `<dest>/sorted_photos/YYYY/MM/DD/<file name>` |
//! | `Excluded` | png, webp, gif                              | not copied                                    |
//! | `Other`    | anything else, including no extension       | `<dest>/<relative path>`                      |
//!
//! Media files with the same name on the same day overwrite each other.

use crate::core::metadata::CaptureTimeExtractor;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Folder under the destination root that holds dated media
pub const SORTED_PHOTOS_DIR: &str = "sorted_photos";

const MEDIA_EXTENSIONS: &[&str] = &["jpg", "jpeg", "mp4", "mov", "avi", "3gp"];
const EXCLUDED_EXTENSIONS: &[&str] = &["png", "webp", "gif"];

/// Routing category derived from a file's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileClass {
    /// Photo or video, sorted by capture date
    Media,
    /// Never copied
    Excluded,
    /// Copied verbatim under its relative path
    Other,
}

impl FileClass {
    /// Classify by lower-cased extension
    pub fn of(path: &Path) -> Self {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => return FileClass::Other,
        };

        if MEDIA_EXTENSIONS.contains(&ext.as_str()) {
            FileClass::Media
        } else if EXCLUDED_EXTENSIONS.contains(&ext.as_str()) {
            FileClass::Excluded
        } else {
            FileClass::Other
        }
    }
}

/// Computes destination paths for source files
pub struct Router {
    dest_root: PathBuf,
    extractor: Arc<dyn CaptureTimeExtractor>,
}

impl Router {
    pub fn new(dest_root: impl Into<PathBuf>, extractor: Arc<dyn CaptureTimeExtractor>) -> Self {
        Self {
            dest_root: dest_root.into(),
            extractor,
        }
    }

    /// Destination for `source`, or `None` if the file is excluded.
    ///
    /// `relative` is the path below the source root and `modified` the
    /// source's mtime, used when no capture time can be read.
    pub fn route(&self, source: &Path, relative: &Path, modified: SystemTime) -> Option<PathBuf> {
        match FileClass::of(source) {
            FileClass::Excluded => None,
            FileClass::Other => Some(self.dest_root.join(relative)),
            FileClass::Media => {
                let date = self.capture_date(source, modified);
                let name = source.file_name()?;
                Some(self.dated_folder(date).join(name))
            }
        }
    }

    fn capture_date(&self, source: &Path, modified: SystemTime) -> NaiveDate {
        match self.extractor.extract_capture_time(source) {
            Ok(taken) => taken.date(),
            Err(e) => {
                tracing::debug!(path = %source.display(), error = %e, "falling back to mtime");
                DateTime::<Local>::from(modified).date_naive()
            }
        }
    }

    fn dated_folder(&self, date: NaiveDate) -> PathBuf {
        self.dest_root
            .join(SORTED_PHOTOS_DIR)
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
            .join(format!("{:02}", date.day()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;
    use chrono::{NaiveDateTime, TimeZone};

    struct FixedTime(Option<NaiveDateTime>);

    impl CaptureTimeExtractor for FixedTime {
        fn extract_capture_time(&self, path: &Path) -> Result<NaiveDateTime, MetadataError> {
            self.0.ok_or_else(|| MetadataError::NoMetadata {
                path: path.to_path_buf(),
            })
        }
    }

    fn router(taken: Option<NaiveDateTime>) -> Router {
        Router::new("/dest", Arc::new(FixedTime(taken)))
    }

    fn local_noon(y: i32, m: u32, d: u32) -> SystemTime {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap().into()
    }

    #[test]
    fn classifies_media_case_insensitively() {
        for name in ["a.jpg", "a.JPEG", "b.Mp4", "c.mov", "d.AVI", "e.3gp"] {
            assert_eq!(FileClass::of(Path::new(name)), FileClass::Media, "{}", name);
        }
    }

    #[test]
    fn classifies_excluded_images() {
        for name in ["a.png", "a.WEBP", "a.gif"] {
            assert_eq!(FileClass::of(Path::new(name)), FileClass::Excluded, "{}", name);
        }
    }

    #[test]
    fn classifies_everything_else_as_other() {
        assert_eq!(FileClass::of(Path::new("notes.txt")), FileClass::Other);
        assert_eq!(FileClass::of(Path::new("Makefile")), FileClass::Other);
        assert_eq!(FileClass::of(Path::new("photo.heic")), FileClass::Other);
        assert_eq!(FileClass::of(Path::new(".jpg")), FileClass::Other);
    }

    #[test]
    fn media_routes_by_capture_time() {
        let taken = NaiveDate::from_ymd_opt(2023, 5, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let dest = router(Some(taken)).route(
            Path::new("/src/dcim/IMG_1.jpg"),
            Path::new("dcim/IMG_1.jpg"),
            local_noon(2020, 1, 1),
        );

        assert_eq!(dest, Some(PathBuf::from("/dest/sorted_photos/2023/05/10/IMG_1.jpg")));
    }

    #[test]
    fn media_without_metadata_uses_mtime() {
        let dest = router(None).route(
            Path::new("/src/clips/movie.MOV"),
            Path::new("clips/movie.MOV"),
            local_noon(2021, 1, 2),
        );

        assert_eq!(dest, Some(PathBuf::from("/dest/sorted_photos/2021/01/02/movie.MOV")));
    }

    #[test]
    fn other_files_keep_relative_path() {
        let dest = router(None).route(
            Path::new("/src/docs/notes.txt"),
            Path::new("docs/notes.txt"),
            local_noon(2021, 1, 2),
        );

        assert_eq!(dest, Some(PathBuf::from("/dest/docs/notes.txt")));
    }

    #[test]
    fn excluded_files_have_no_destination() {
        let dest = router(None).route(
            Path::new("/src/screens/shot.png"),
            Path::new("screens/shot.png"),
            local_noon(2021, 1, 2),
        );

        assert_eq!(dest, None);
    }
}
