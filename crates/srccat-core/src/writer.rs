//! Aggregate artifact writer.
//!
//! Each block is:
//!
//! ```text
//! File: <path>
//! <raw file contents>
//! <separator>
//! ```
//!
//! Contents are copied byte for byte. Nothing is escaped, so a source line
//! starting with `File: ` is indistinguishable from a header.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

use crate::HEADER_PREFIX;
use crate::options::SeparatorMode;

/// Writes `File:` blocks to any [`Write`] sink.
#[derive(Debug)]
pub struct AggregateWriter<W: Write> {
    inner: W,
    separator: SeparatorMode,
    blocks: usize,
    bytes_copied: u64,
}

impl<W: Write> AggregateWriter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W, separator: SeparatorMode) -> Self {
        Self {
            inner,
            separator,
            blocks: 0,
            bytes_copied: 0,
        }
    }

    /// Append one block for `path` with the given contents.
    pub fn write_entry(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.inner.write_all(HEADER_PREFIX.as_bytes())?;
        self.inner.write_all(&path_bytes(path))?;
        self.inner.write_all(b"\n")?;
        self.inner.write_all(contents)?;
        self.inner.write_all(self.separator.as_bytes())?;
        self.blocks += 1;
        self.bytes_copied += contents.len() as u64;
        Ok(())
    }

    /// Blocks written so far.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// File-content bytes written so far (headers and separators excluded).
    pub fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Raw path bytes on Unix so non-UTF-8 names survive unchanged.
#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}
