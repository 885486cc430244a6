//! Path exclusion rules applied while walking the source tree.

use std::path::Path;

/// Marker that excludes any path containing it, anywhere in the text
pub const RECYCLE_BIN_MARKER: &str = "RECYCLE.BIN";

/// Decides which walked paths never become jobs
#[derive(Debug, Clone)]
pub struct PathFilter {
    excluded_substrings: Vec<String>,
}

impl PathFilter {
    /// Filter with the recycle-bin rule only
    pub fn new() -> Self {
        Self {
            excluded_substrings: vec![RECYCLE_BIN_MARKER.to_string()],
        }
    }

    /// True if the path contains an excluded substring.
    ///
    /// This is a plain substring test on the whole path, not a match on
    /// path components: `$RECYCLE.BIN.old/x` is excluded too.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.excluded_substrings
            .iter()
            .any(|needle| text.contains(needle.as_str()))
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new()
    }
}
