//! # srccat-core
//!
//! Recursive source-file matching and aggregate concatenation.
//!
//! This crate holds everything the `srccat` binary needs to turn a set of
//! filesystem roots into one text artifact:
//!
//! - **Options**: [`ConcatOptions`], [`WalkOptions`], [`SeparatorMode`], [`TraversalOrder`]
//! - **Matching**: [`MatchFilter`] (suffixes, exclude globs, hidden entries, the artifact itself)
//! - **Walking**: [`Walker`] yields matching files per root in traversal order
//! - **Writing**: [`AggregateWriter`] emits `File: <path>` blocks
//! - **Running**: [`concatenate`] and [`collect`] drive a whole run and produce a [`RunReport`]
//! - **Errors**: [`ConcatError`] via `thiserror`
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` stderr subscriber

#![deny(unsafe_code)]

pub mod concat;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod options;
pub mod report;
pub mod walker;
pub mod writer;

pub use concat::{collect, concatenate};
pub use errors::{ConcatError, Result};
pub use filter::MatchFilter;
pub use options::{ConcatOptions, SeparatorMode, TraversalOrder, WalkOptions};
pub use report::{RunReport, SkippedFile};
pub use walker::Walker;
pub use writer::AggregateWriter;

/// Default artifact name.
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// Default file-name suffix.
pub const DEFAULT_SUFFIX: &str = ".py";

/// Header prefix written before each file's path.
pub const HEADER_PREFIX: &str = "File: ";
