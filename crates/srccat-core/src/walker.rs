//! Recursive descent over one root.
//!
//! Built on `walkdir`: entries are pruned with [`MatchFilter::prunes`]
//! before descending, so excluded or hidden directories are never read.
//! Yielded paths keep the root exactly as given (`proj/sub/b.py`, not an
//! absolute or normalized form).

use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use crate::errors::{ConcatError, Result};
use crate::filter::MatchFilter;
use crate::options::{TraversalOrder, WalkOptions};

/// Walks roots and yields matching regular files.
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    options: &'a WalkOptions,
    filter: &'a MatchFilter,
}

impl<'a> Walker<'a> {
    /// Create a walker over `options` using the compiled `filter`.
    pub fn new(options: &'a WalkOptions, filter: &'a MatchFilter) -> Self {
        Self { options, filter }
    }

    /// Fail with [`ConcatError::RootNotFound`] unless `root` exists.
    pub fn check_root(root: &Path) -> Result<()> {
        if std::fs::metadata(root).is_ok() {
            Ok(())
        } else {
            Err(ConcatError::RootNotFound {
                path: root.display().to_string(),
            })
        }
    }

    /// Iterate over matching files below `root` in traversal order.
    ///
    /// Walk failures (unreadable directories, symlink loops) are yielded as
    /// [`ConcatError::Walk`] items so the caller decides whether to stop.
    pub fn walk(self, root: &'a Path) -> impl Iterator<Item = Result<PathBuf>> + 'a {
        let filter = self.filter;

        let mut walker = WalkDir::new(root).follow_links(self.options.follow_links);
        if let Some(depth) = self.options.max_depth {
            walker = walker.max_depth(depth);
        }
        if self.options.order == TraversalOrder::Sorted {
            walker = walker.sort_by_file_name();
        }

        walker
            .into_iter()
            .filter_entry(move |e| !filter.prunes(relative(root, e.path()), e.file_name(), e.depth()))
            .filter_map(move |entry| match entry {
                Ok(e) => {
                    if !e.file_type().is_file() {
                        return None;
                    }
                    if filter.accepts(e.path(), relative(root, e.path()), e.file_name()) {
                        trace!(path = %e.path().display(), "matched");
                        Some(Ok(e.into_path()))
                    } else {
                        None
                    }
                }
                Err(source) => {
                    let path = source
                        .path()
                        .unwrap_or(root)
                        .display()
                        .to_string();
                    Some(Err(ConcatError::Walk { path, source }))
                }
            })
    }
}

fn relative<'p>(root: &Path, path: &'p Path) -> &'p Path {
    path.strip_prefix(root).unwrap_or(path)
}
