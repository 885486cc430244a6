//! # Metadata Module
//!
//! Reads the capture time embedded in media files.
//!
//! ## Lookup order
//! 1. EXIF `DateTimeOriginal` (when the shutter fired)
//! 2. EXIF `DateTime` (last written by the camera or editor)
//!
//! Anything else, including files that merely carry a photo extension, is a
//! [`MetadataError`]; callers fall back to the filesystem modification time.

use crate::error::MetadataError;
use chrono::NaiveDateTime;
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIF date format: "YYYY:MM:DD HH:MM:SS"
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Source of capture timestamps.
///
/// The router only depends on this trait, so tests can inject fixed times.
pub trait CaptureTimeExtractor: Send + Sync {
    /// Capture time as recorded by the device (no time zone)
    fn extract_capture_time(&self, path: &Path) -> Result<NaiveDateTime, MetadataError>;
}

/// Production extractor backed by kamadak-exif
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifExtractor;

impl ExifExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureTimeExtractor for ExifExtractor {
    fn extract_capture_time(&self, path: &Path) -> Result<NaiveDateTime, MetadataError> {
        let file = File::open(path).map_err(|source| MetadataError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = BufReader::new(file);
        let exif = Reader::new()
            .read_from_container(&mut reader)
            .map_err(|_| MetadataError::NoMetadata {
                path: path.to_path_buf(),
            })?;

        for tag in [Tag::DateTimeOriginal, Tag::DateTime] {
            if let Some(raw) = ascii_field(&exif, tag) {
                return parse_exif_datetime(&raw).ok_or_else(|| MetadataError::InvalidTimestamp {
                    path: path.to_path_buf(),
                    value: raw,
                });
            }
        }

        Err(MetadataError::NoMetadata {
            path: path.to_path_buf(),
        })
    }
}

/// First ASCII value of a primary-image tag, trimmed of NULs and spaces
fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    if let Value::Ascii(ref vec) = field.value {
        let bytes = vec.first()?;
        let s = std::str::from_utf8(bytes).ok()?;
        let trimmed = s.trim_end_matches('\0').trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    None
}

/// Parse an EXIF timestamp. Some writers use dashes in the date part.
pub fn parse_exif_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim_matches('"').trim();
    NaiveDateTime::parse_from_str(raw, EXIF_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Minimal JPEG carrying only an EXIF `DateTimeOriginal` tag.
///
/// Test fixture shared by unit and integration tests.
#[doc(hidden)]
pub fn jpeg_with_capture_time(datetime: &str) -> Vec<u8> {
    // NUL-terminated ASCII, always longer than 4 bytes so it lives out of line
    let count = (datetime.len() + 1) as u32;

    // Little-endian TIFF: IFD0 -> Exif IFD -> DateTimeOriginal
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    // IFD0 at 8: one entry pointing at the Exif IFD at 26
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes());
    tiff.extend_from_slice(&4u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&26u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    // Exif IFD at 26: DateTimeOriginal stored at 44
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x9003u16.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&count.to_le_bytes());
    tiff.extend_from_slice(&44u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(datetime.as_bytes());
    tiff.push(0);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    let segment_len = (2 + 6 + tiff.len()) as u16;
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}
