//! Concatenation error types.

use std::io;

use thiserror::Error;

/// Errors that can occur while walking roots or writing the artifact.
#[derive(Debug, Error)]
pub enum ConcatError {
    /// A root passed on the command line does not exist.
    #[error("root not found: {path}")]
    RootNotFound {
        /// The missing root.
        path: String,
    },

    /// An exclude glob failed to compile.
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: globset::Error,
    },

    /// The directory walk failed (permission denied, symlink loop, ...).
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Entry path if known, otherwise the root being walked.
        path: String,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// A matched file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output artifact could not be removed, created or written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The output artifact.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An option value could not be parsed.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl ConcatError {
    /// Whether `keep_going` may skip past this error.
    ///
    /// Only per-entry failures are skippable; a broken artifact or bad
    /// configuration always aborts the run.
    pub fn is_per_entry(&self) -> bool {
        matches!(self, Self::Walk { .. } | Self::Read { .. })
    }
}

/// Result type for concatenation operations.
pub type Result<T> = std::result::Result<T, ConcatError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_not_found_display() {
        let err = ConcatError::RootNotFound {
            path: "proj".into(),
        };
        assert_eq!(err.to_string(), "root not found: proj");
    }

    #[test]
    fn read_error_keeps_source() {
        let err = ConcatError::Read {
            path: "a.py".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("a.py"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_pattern_display() {
        let source = globset::Glob::new("a[").unwrap_err();
        let err = ConcatError::InvalidPattern {
            pattern: "a[".into(),
            source,
        };
        assert!(err.to_string().starts_with("invalid exclude pattern \"a[\""));
    }

    #[test]
    fn per_entry_classification() {
        let read = ConcatError::Read {
            path: "x".into(),
            source: io::Error::other("boom"),
        };
        let write = ConcatError::Write {
            path: "output.txt".into(),
            source: io::Error::other("disk full"),
        };
        assert!(read.is_per_entry());
        assert!(!write.is_per_entry());
        assert!(!ConcatError::InvalidValue("x".into()).is_per_entry());
    }
}
