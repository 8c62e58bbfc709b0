//! Whole-run drivers.
//!
//! [`concatenate`] deletes the artifact, walks every root in order and
//! appends one block per matching file. [`collect`] runs the same walk
//! without touching the artifact.
//!
//! Roots and exclude patterns are validated before the old artifact is
//! removed, so a typo on the command line leaves the previous output alone.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use crate::errors::{ConcatError, Result};
use crate::filter::MatchFilter;
use crate::options::ConcatOptions;
use crate::report::{RunReport, SkippedFile};
use crate::walker::Walker;
use crate::writer::AggregateWriter;

/// Rebuild the artifact from scratch and report what was written.
pub fn concatenate(options: &ConcatOptions) -> Result<RunReport> {
    let started_at = chrono::Utc::now().to_rfc3339();
    let start = Instant::now();

    for root in &options.roots {
        Walker::check_root(root)?;
    }
    let filter = MatchFilter::new(&options.walk)?;

    let output = options.output.display().to_string();
    let file = recreate(&options.output).map_err(|source| ConcatError::Write {
        path: output.clone(),
        source,
    })?;
    let filter = filter.excluding_output(&options.output);
    let walker = Walker::new(&options.walk, &filter);

    let mut writer = AggregateWriter::new(BufWriter::new(file), options.separator);
    let mut skipped = Vec::new();

    for root in &options.roots {
        let _span = info_span!("root", root = %root.display()).entered();
        for item in walker.walk(root) {
            let path = match item {
                Ok(path) => path,
                Err(err) => {
                    skip_or_fail(err, options.keep_going, &mut skipped)?;
                    continue;
                }
            };

            let contents = match std::fs::read(&path) {
                Ok(contents) => contents,
                Err(source) => {
                    let err = ConcatError::Read {
                        path: path.display().to_string(),
                        source,
                    };
                    skip_or_fail(err, options.keep_going, &mut skipped)?;
                    continue;
                }
            };

            writer
                .write_entry(&path, &contents)
                .map_err(|source| ConcatError::Write {
                    path: output.clone(),
                    source,
                })?;
            debug!(path = %path.display(), bytes = contents.len(), "appended");
        }
    }

    let files_written = writer.blocks();
    let bytes_copied = writer.bytes_copied();
    drop(writer.finish().map_err(|source| ConcatError::Write {
        path: output.clone(),
        source,
    })?);

    let report = RunReport {
        started_at,
        roots: options
            .roots
            .iter()
            .map(|r| r.display().to_string())
            .collect(),
        output,
        files_written,
        bytes_copied,
        skipped,
        elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    info!(
        files = report.files_written,
        bytes = report.bytes_copied,
        skipped = report.skipped.len(),
        output = %report.output,
        elapsed_ms = report.elapsed_ms,
        "concatenation complete"
    );
    if report.is_empty() {
        info!("no files matched");
    }

    Ok(report)
}

/// List the files a run would write, in order, without touching the artifact.
pub fn collect(options: &ConcatOptions) -> Result<Vec<PathBuf>> {
    for root in &options.roots {
        Walker::check_root(root)?;
    }
    let filter = MatchFilter::new(&options.walk)?.excluding_output(&options.output);
    let walker = Walker::new(&options.walk, &filter);

    let mut matches = Vec::new();
    let mut skipped = Vec::new();
    for root in &options.roots {
        for item in walker.walk(root) {
            match item {
                Ok(path) => matches.push(path),
                Err(err) => skip_or_fail(err, options.keep_going, &mut skipped)?,
            }
        }
    }
    Ok(matches)
}

/// Delete any previous artifact and create an empty one.
fn recreate(path: &Path) -> io::Result<File> {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed previous output"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    File::create(path)
}

fn skip_or_fail(err: ConcatError, keep_going: bool, skipped: &mut Vec<SkippedFile>) -> Result<()> {
    if !keep_going || !err.is_per_entry() {
        return Err(err);
    }
    let path = match &err {
        ConcatError::Walk { path, .. } | ConcatError::Read { path, .. } => path.clone(),
        _ => String::new(),
    };
    warn!(%path, error = %err, "skipping");
    skipped.push(SkippedFile {
        path,
        reason: err.to_string(),
    });
    Ok(())
}
