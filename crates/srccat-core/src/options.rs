//! Run options.
//!
//! Enums serialize as kebab-case strings (`"blank-line"`, `"literal"`,
//! `"sorted"`, `"os"`) and parse from the same strings via [`FromStr`], so
//! the settings file, env vars and CLI flags all share one spelling.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConcatError;
use crate::{DEFAULT_OUTPUT, DEFAULT_SUFFIX};

/// What follows each file's contents in the artifact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeparatorMode {
    /// Two newline bytes, i.e. a real blank line after contents that end in one.
    #[default]
    BlankLine,
    /// The two characters `\n` followed by a newline, byte-compatible with
    /// artifacts produced by the old shell wrapper.
    Literal,
}

impl SeparatorMode {
    /// Bytes written after each file's contents.
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::BlankLine => b"\n\n",
            Self::Literal => b"\\n\n",
        }
    }

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlankLine => "blank-line",
            Self::Literal => "literal",
        }
    }
}

impl fmt::Display for SeparatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeparatorMode {
    type Err = ConcatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blank-line" | "blank_line" | "blank" | "newline" => Ok(Self::BlankLine),
            "literal" => Ok(Self::Literal),
            other => Err(ConcatError::InvalidValue(format!(
                "unknown separator mode {other:?} (expected blank-line or literal)"
            ))),
        }
    }
}

/// Order in which entries of one directory are visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Sorted by file name, stable across runs.
    #[default]
    Sorted,
    /// Whatever order the OS returns directory entries in.
    Os,
}

impl TraversalOrder {
    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sorted => "sorted",
            Self::Os => "os",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalOrder {
    type Err = ConcatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sorted" | "name" => Ok(Self::Sorted),
            "os" | "unsorted" => Ok(Self::Os),
            other => Err(ConcatError::InvalidValue(format!(
                "unknown traversal order {other:?} (expected sorted or os)"
            ))),
        }
    }
}

/// Which files a walk yields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkOptions {
    /// File-name suffixes to match (any of).
    pub suffixes: Vec<String>,
    /// Glob patterns to exclude, matched against the root-relative path
    /// and the bare file name.
    pub exclude: Vec<String>,
    /// Maximum depth below each root (root itself is depth 0).
    pub max_depth: Option<usize>,
    /// Follow symbolic links while descending.
    pub follow_links: bool,
    /// Skip dot-files and dot-directories below the root.
    pub skip_hidden: bool,
    /// Per-directory visit order.
    pub order: TraversalOrder,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            suffixes: vec![DEFAULT_SUFFIX.to_string()],
            exclude: Vec::new(),
            max_depth: None,
            follow_links: false,
            skip_hidden: false,
            order: TraversalOrder::default(),
        }
    }
}

/// Everything one concatenation run needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConcatOptions {
    /// Roots to walk, in order.
    pub roots: Vec<PathBuf>,
    /// Artifact path. Deleted and recreated on every run.
    pub output: PathBuf,
    /// Separator written after each block.
    pub separator: SeparatorMode,
    /// Matching rules.
    pub walk: WalkOptions,
    /// Log and skip unreadable entries instead of aborting.
    pub keep_going: bool,
}

impl ConcatOptions {
    /// Options for `roots` with every other field at its default.
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            separator: SeparatorMode::default(),
            walk: WalkOptions::default(),
            keep_going: false,
        }
    }

    /// Set the artifact path.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the separator mode.
    #[must_use]
    pub fn with_separator(mut self, separator: SeparatorMode) -> Self {
        self.separator = separator;
        self
    }

    /// Replace the walk options.
    #[must_use]
    pub fn with_walk(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }

    /// Enable or disable `keep_going`.
    #[must_use]
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}
