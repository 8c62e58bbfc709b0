//! Run summary.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// A file or directory that `keep_going` stepped over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// Path as seen by the walk.
    pub path: String,
    /// Error message.
    pub reason: String,
}

/// Outcome of one [`concatenate`](crate::concatenate) run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// RFC 3339 start time.
    pub started_at: String,
    /// Roots in the order they were walked.
    pub roots: Vec<String>,
    /// Artifact path.
    pub output: String,
    /// Blocks written to the artifact.
    pub files_written: usize,
    /// File-content bytes copied (headers and separators excluded).
    pub bytes_copied: u64,
    /// Entries skipped under `keep_going`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
    /// Wall-clock duration.
    pub elapsed_ms: u64,
}

impl RunReport {
    /// No file matched.
    pub fn is_empty(&self) -> bool {
        self.files_written == 0
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "wrote {} file(s), {} byte(s) to {}",
            self.files_written, self.bytes_copied, self.output
        );
        if !self.skipped.is_empty() {
            let _ = write!(line, " ({} skipped)", self.skipped.len());
        }
        line
    }
}
