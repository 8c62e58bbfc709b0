//! # srccat
//!
//! Concatenates every matching source file below the given roots into one
//! text artifact, each file preceded by a `File: <path>` line.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use srccat_core::{SeparatorMode, TraversalOrder, collect, concatenate, logging};
use srccat_settings::{
    RejectedOverride, SrccatSettings, load_settings_with_rejected, settings_path,
};

/// Concatenate source trees into one text file.
#[derive(Parser, Debug)]
#[command(
    name = "srccat",
    version,
    about = "Concatenate source files below the given roots into one text file"
)]
struct Cli {
    /// Directories (or files) to walk, in order.
    #[arg(required = true, value_name = "ROOT")]
    roots: Vec<PathBuf>,

    /// Output artifact. Deleted and rebuilt on every run.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// File-name suffix to match (repeatable). Replaces configured suffixes.
    #[arg(short = 's', long = "suffix", value_name = "SUFFIX")]
    suffixes: Vec<String>,

    /// Glob to exclude (repeatable). Added to configured excludes.
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Maximum depth below each root.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Follow symbolic links.
    #[arg(short = 'L', long)]
    follow_links: bool,

    /// Skip dot-files and dot-directories.
    #[arg(long)]
    skip_hidden: bool,

    /// Per-directory visit order: `sorted` or `os`.
    #[arg(long, value_name = "ORDER")]
    order: Option<TraversalOrder>,

    /// Separator after each file: `blank-line` or `literal`.
    #[arg(long, value_name = "MODE")]
    separator: Option<SeparatorMode>,

    /// Log and skip unreadable entries instead of aborting.
    #[arg(short = 'k', long)]
    keep_going: bool,

    /// Print matching paths and exit without writing the artifact.
    #[arg(long, conflicts_with = "json")]
    list: bool,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Settings file (defaults to `~/.srccat/settings.json`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer command-line flags over loaded settings.
    fn apply(&self, settings: &mut SrccatSettings) {
        if let Some(ref output) = self.output {
            settings.output.path = output.to_string_lossy().into_owned();
        }
        if let Some(separator) = self.separator {
            settings.output.separator = separator;
        }
        if !self.suffixes.is_empty() {
            settings.walk.suffixes.clone_from(&self.suffixes);
        }
        settings.walk.exclude.extend(self.exclude.iter().cloned());
        if self.max_depth.is_some() {
            settings.walk.max_depth = self.max_depth;
        }
        if let Some(order) = self.order {
            settings.walk.order = order;
        }
        settings.walk.follow_links |= self.follow_links;
        settings.walk.skip_hidden |= self.skip_hidden;
        settings.walk.keep_going |= self.keep_going;
    }

    /// Load settings without logging; rejected env overrides are returned
    /// so they can be reported once the subscriber is installed.
    fn load_settings(&self) -> Result<(SrccatSettings, Vec<RejectedOverride>)> {
        let path = match self.config {
            Some(ref path) => {
                if !path.exists() {
                    bail!("settings file not found: {}", path.display());
                }
                path.clone()
            }
            None => settings_path(),
        };
        load_settings_with_rejected(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let (mut settings, rejected) = args.load_settings()?;
    args.apply(&mut settings);
    settings.validate().context("Invalid options")?;

    logging::init_subscriber(logging::level_for_verbosity(
        &settings.logging.level,
        args.verbose,
    ));
    for r in &rejected {
        r.log();
    }
    tracing::debug!(?settings, "settings resolved");

    let options = settings.concat_options(args.roots.clone());

    if args.list {
        for path in collect(&options)? {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let report = concatenate(&options)
        .with_context(|| format!("Failed to build {}", options.output.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        tracing::info!("{}", report.summary());
    }

    Ok(())
}
