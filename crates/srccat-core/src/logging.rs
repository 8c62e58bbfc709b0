//! `tracing` subscriber setup.
//!
//! Logs go to stderr so stdout stays free for `--list` and `--json`
//! output. `RUST_LOG` takes precedence over the configured level.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Level used when nothing else is configured.
pub const DEFAULT_LEVEL: &str = "warn";

/// Initialize the global tracing subscriber with stderr output.
///
/// Call once at startup. Subsequent calls are no-ops.
pub fn init_subscriber(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails if a global subscriber is already set
    let _ = subscriber.try_init();
}

/// Raise `base` by `verbosity` steps (`-v` = info, `-vv` = debug, `-vvv` = trace).
///
/// Never lowers a level that is already more verbose.
pub fn level_for_verbosity(base: &str, verbosity: u8) -> &str {
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    let base_idx = LEVELS
        .iter()
        .position(|l| l.eq_ignore_ascii_case(base.trim()));
    let Some(base_idx) = base_idx else {
        // Directive strings like "srccat_core=debug" pass through untouched.
        return if verbosity == 0 { base } else { LEVELS[(1 + usize::from(verbosity)).min(4)] };
    };
    if verbosity == 0 {
        return LEVELS[base_idx];
    }
    LEVELS[(base_idx.max(1) + usize::from(verbosity)).min(4)]
}
