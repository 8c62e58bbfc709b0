//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]`, so a
//! settings file may be partial: missing fields keep their default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use srccat_core::{
    ConcatOptions, DEFAULT_OUTPUT, DEFAULT_SUFFIX, SeparatorMode, TraversalOrder, WalkOptions,
};

use crate::errors::{Result, SettingsError};

/// Root settings type.
///
/// ```json
/// {
///   "output": { "path": "dump.txt", "separator": "literal" },
///   "walk": { "suffixes": [".py", ".pyi"], "exclude": ["__pycache__"] }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SrccatSettings {
    /// Settings schema version.
    pub version: String,
    /// Artifact settings.
    pub output: OutputSettings,
    /// Matching and traversal settings.
    pub walk: WalkSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for SrccatSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            output: OutputSettings::default(),
            walk: WalkSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl SrccatSettings {
    /// Reject settings no run could use.
    pub fn validate(&self) -> Result<()> {
        if self.output.path.trim().is_empty() {
            return Err(SettingsError::InvalidValue("output.path is empty".into()));
        }
        if self.walk.suffixes.is_empty() {
            return Err(SettingsError::InvalidValue("walk.suffixes is empty".into()));
        }
        if self.walk.max_depth == Some(0) {
            return Err(SettingsError::InvalidValue(
                "walk.maxDepth must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Walk options for a run.
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            suffixes: self.walk.suffixes.clone(),
            exclude: self.walk.exclude.clone(),
            max_depth: self.walk.max_depth,
            follow_links: self.walk.follow_links,
            skip_hidden: self.walk.skip_hidden,
            order: self.walk.order,
        }
    }

    /// Full run options over `roots`.
    pub fn concat_options(&self, roots: Vec<PathBuf>) -> ConcatOptions {
        ConcatOptions {
            roots,
            output: PathBuf::from(&self.output.path),
            separator: self.output.separator,
            walk: self.walk_options(),
            keep_going: self.walk.keep_going,
        }
    }
}

/// Artifact settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputSettings {
    /// Artifact path, relative to the working directory.
    pub path: String,
    /// Separator after each block.
    pub separator: SeparatorMode,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT.to_string(),
            separator: SeparatorMode::default(),
        }
    }
}

/// Matching and traversal settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalkSettings {
    /// File-name suffixes to include.
    pub suffixes: Vec<String>,
    /// Exclude globs.
    pub exclude: Vec<String>,
    /// Maximum depth below each root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Follow symbolic links.
    pub follow_links: bool,
    /// Skip dot-files and dot-directories.
    pub skip_hidden: bool,
    /// Per-directory visit order.
    pub order: TraversalOrder,
    /// Skip unreadable entries instead of aborting.
    pub keep_going: bool,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            suffixes: vec![DEFAULT_SUFFIX.to_string()],
            exclude: Vec::new(),
            max_depth: None,
            follow_links: false,
            skip_hidden: false,
            order: TraversalOrder::default(),
            keep_going: false,
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: srccat_core::logging::DEFAULT_LEVEL.to_string(),
        }
    }
}
