//! Entry matching.
//!
//! A [`MatchFilter`] decides two things for every walk entry:
//! whether to prune it (and, for directories, everything below it), and
//! whether a regular file is a match that belongs in the artifact.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::errors::{ConcatError, Result};
use crate::options::WalkOptions;

/// Compiled matching rules for one run.
#[derive(Debug, Clone)]
pub struct MatchFilter {
    suffixes: Vec<String>,
    exclude: Vec<GlobMatcher>,
    skip_hidden: bool,
    output: Option<PathBuf>,
}

impl MatchFilter {
    /// Compile the suffix and exclude rules from `options`.
    pub fn new(options: &WalkOptions) -> Result<Self> {
        let exclude = options
            .exclude
            .iter()
            .map(|pattern| {
                GlobBuilder::new(pattern)
                    .literal_separator(false)
                    .build()
                    .map(|g| g.compile_matcher())
                    .map_err(|source| ConcatError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            suffixes: options.suffixes.clone(),
            exclude,
            skip_hidden: options.skip_hidden,
            output: None,
        })
    }

    /// Never match the artifact at `output`, even if its name carries a
    /// matching suffix.
    #[must_use]
    pub fn excluding_output(mut self, output: &Path) -> Self {
        self.output = Some(absolute_output(output));
        self
    }

    /// Whether the file name ends with one of the configured suffixes.
    pub fn matches_suffix(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    /// Whether an entry at `depth` below its root should be skipped.
    ///
    /// `relative` is the path relative to the root. The root itself
    /// (depth 0) is never pruned.
    pub fn prunes(&self, relative: &Path, name: &OsStr, depth: usize) -> bool {
        if depth == 0 {
            return false;
        }
        if self.skip_hidden && name.to_string_lossy().starts_with('.') {
            return true;
        }
        self.is_excluded(relative, name)
    }

    /// Whether a regular file at `path` belongs in the artifact.
    pub fn accepts(&self, path: &Path, relative: &Path, name: &OsStr) -> bool {
        self.matches_suffix(name) && !self.is_excluded(relative, name) && !self.is_output(path)
    }

    fn is_excluded(&self, relative: &Path, name: &OsStr) -> bool {
        self.exclude.iter().any(|m| {
            (!relative.as_os_str().is_empty() && m.is_match(relative))
                || m.is_match(Path::new(name))
        })
    }

    fn is_output(&self, path: &Path) -> bool {
        let Some(output) = &self.output else {
            return false;
        };
        // Cheap name check first; only canonicalize candidates.
        if path.file_name() != output.file_name() {
            return false;
        }
        path.canonicalize().is_ok_and(|p| &p == output)
    }
}

/// Best-effort absolute form of the artifact path, usable before the
/// artifact exists.
fn absolute_output(output: &Path) -> PathBuf {
    if let Ok(p) = output.canonicalize() {
        return p;
    }
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    match (parent.canonicalize(), output.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => output.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn filter(suffixes: &[&str], exclude: &[&str], skip_hidden: bool) -> MatchFilter {
        MatchFilter::new(&WalkOptions {
            suffixes: suffixes.iter().map(ToString::to_string).collect(),
            exclude: exclude.iter().map(ToString::to_string).collect(),
            skip_hidden,
            ..WalkOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn suffix_match() {
        let f = filter(&[".py"], &[], false);
        assert!(f.matches_suffix(OsStr::new("a.py")));
        assert!(f.matches_suffix(OsStr::new(".py")));
        assert!(!f.matches_suffix(OsStr::new("a.pyc")));
        assert!(!f.matches_suffix(OsStr::new("readme.md")));
    }

    #[test]
    fn multiple_suffixes() {
        let f = filter(&[".py", ".pyi"], &[], false);
        assert!(f.matches_suffix(OsStr::new("stub.pyi")));
        assert!(f.matches_suffix(OsStr::new("mod.py")));
    }

    #[test]
    fn exclude_by_name_and_relative_path() {
        let f = filter(&[".py"], &["test_*", "build/**"], false);
        assert!(!f.accepts(
            Path::new("proj/test_a.py"),
            Path::new("test_a.py"),
            OsStr::new("test_a.py")
        ));
        assert!(!f.accepts(
            Path::new("proj/build/gen.py"),
            Path::new("build/gen.py"),
            OsStr::new("gen.py")
        ));
        assert!(f.accepts(Path::new("proj/a.py"), Path::new("a.py"), OsStr::new("a.py")));
    }

    #[test]
    fn excluded_directory_is_pruned() {
        let f = filter(&[".py"], &["__pycache__"], false);
        assert!(f.prunes(Path::new("pkg/__pycache__"), OsStr::new("__pycache__"), 2));
        assert!(!f.prunes(Path::new("pkg"), OsStr::new("pkg"), 1));
    }

    #[test]
    fn hidden_entries_only_pruned_when_asked() {
        let keep = filter(&[".py"], &[], false);
        let skip = filter(&[".py"], &[], true);
        assert!(!keep.prunes(Path::new(".venv"), OsStr::new(".venv"), 1));
        assert!(skip.prunes(Path::new(".venv"), OsStr::new(".venv"), 1));
    }

    #[test]
    fn root_is_never_pruned() {
        let f = filter(&[".py"], &["*"], true);
        assert!(!f.prunes(Path::new(""), OsStr::new(".hidden_root"), 0));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let err = MatchFilter::new(&WalkOptions {
            exclude: vec!["a[".into()],
            ..WalkOptions::default()
        })
        .unwrap_err();
        assert_matches!(err, ConcatError::InvalidPattern { pattern, .. } if pattern == "a[");
    }

    #[test]
    fn output_artifact_never_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dump.py");
        std::fs::write(&out, "x").unwrap();
        let other = dir.path().join("real.py");
        std::fs::write(&other, "y").unwrap();

        let f = filter(&[".py"], &[], false).excluding_output(&out);
        assert!(!f.accepts(&out, Path::new("dump.py"), OsStr::new("dump.py")));
        assert!(f.accepts(&other, Path::new("real.py"), OsStr::new("real.py")));
    }

    #[test]
    fn output_exclusion_works_before_artifact_exists() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("later.py");
        let f = filter(&[".py"], &[], false).excluding_output(&out);
        std::fs::write(&out, "x").unwrap();
        assert!(!f.accepts(&out, Path::new("later.py"), OsStr::new("later.py")));
    }
}
