//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`SrccatSettings::default()`]
//! 2. If the settings file exists, deep-merge user values over defaults
//! 3. Apply `SRCCAT_*` environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::SrccatSettings;

/// An `SRCCAT_*` variable that was set but could not be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedOverride {
    /// Variable name.
    pub key: &'static str,
    /// Raw value as found in the environment.
    pub value: String,
    /// Why it was ignored.
    pub reason: String,
}

impl RejectedOverride {
    /// Emit the `warn` event for this override.
    pub fn log(&self) {
        tracing::warn!(
            key = self.key,
            value = %self.value,
            reason = %self.reason,
            "invalid env var, ignoring"
        );
    }
}

/// Resolve the path to the settings file (`~/.srccat/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".srccat").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<SrccatSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// Rejected env overrides are logged immediately; use
/// [`load_settings_with_rejected`] when no subscriber is installed yet.
pub fn load_settings_from_path(path: &Path) -> Result<SrccatSettings> {
    let (settings, rejected) = load_settings_with_rejected(path)?;
    for r in &rejected {
        r.log();
    }
    Ok(settings)
}

/// Load settings from a specific path and hand back the env overrides that
/// were ignored, so the caller can log them once logging is up.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON or unusable values, returns an error.
pub fn load_settings_with_rejected(
    path: &Path,
) -> Result<(SrccatSettings, Vec<RejectedOverride>)> {
    let defaults = serde_json::to_value(SrccatSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let user: Value =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: SrccatSettings =
        serde_json::from_value(merged).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    let rejected = apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok((settings, rejected))
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `SRCCAT_*` environment variable overrides to loaded settings.
///
/// Returns the variables that were set but ignored.
pub fn apply_env_overrides(settings: &mut SrccatSettings) -> Vec<RejectedOverride> {
    apply_overrides(settings, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`.
///
/// Each variable has strict parsing rules:
/// - Integers must be valid and within the specified range
/// - Booleans accept: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`
/// - Lists are comma-separated; blank items are dropped
/// - Invalid values are ignored (fall back to file/default) and returned
pub fn apply_overrides(
    settings: &mut SrccatSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<RejectedOverride> {
    let env = EnvReader {
        lookup,
        rejected: RefCell::new(Vec::new()),
    };

    // ── Output settings ─────────────────────────────────────────────
    if let Some(v) = env.string("SRCCAT_OUTPUT") {
        settings.output.path = v;
    }
    if let Some(v) = env.parsed("SRCCAT_SEPARATOR") {
        settings.output.separator = v;
    }

    // ── Walk settings ───────────────────────────────────────────────
    if let Some(v) = env.list("SRCCAT_SUFFIXES") {
        settings.walk.suffixes = v;
    }
    if let Some(v) = env.list("SRCCAT_EXCLUDE") {
        settings.walk.exclude = v;
    }
    if let Some(v) = env.usize("SRCCAT_MAX_DEPTH", 1, 4096) {
        settings.walk.max_depth = Some(v);
    }
    if let Some(v) = env.bool("SRCCAT_FOLLOW_LINKS") {
        settings.walk.follow_links = v;
    }
    if let Some(v) = env.bool("SRCCAT_SKIP_HIDDEN") {
        settings.walk.skip_hidden = v;
    }
    if let Some(v) = env.bool("SRCCAT_KEEP_GOING") {
        settings.walk.keep_going = v;
    }
    if let Some(v) = env.parsed("SRCCAT_ORDER") {
        settings.walk.order = v;
    }

    // ── Logging settings ────────────────────────────────────────────
    if let Some(v) = env.string("SRCCAT_LOG_LEVEL") {
        settings.logging.level = v;
    }

    env.rejected.into_inner()
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a comma-separated list. Returns `None` if no item is left.
pub fn parse_list(val: &str) -> Option<Vec<String>> {
    let items: Vec<String> = val
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    (!items.is_empty()).then_some(items)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

struct EnvReader<F> {
    lookup: F,
    rejected: RefCell<Vec<RejectedOverride>>,
}

impl<F: Fn(&str) -> Option<String>> EnvReader<F> {
    fn raw(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
    }

    fn reject(&self, key: &'static str, value: String, reason: impl Into<String>) {
        self.rejected.borrow_mut().push(RejectedOverride {
            key,
            value,
            reason: reason.into(),
        });
    }

    fn string(&self, name: &str) -> Option<String> {
        self.raw(name).filter(|v| !v.is_empty())
    }

    fn bool(&self, name: &'static str) -> Option<bool> {
        let val = self.raw(name)?;
        let result = parse_bool(&val);
        if result.is_none() {
            self.reject(name, val, "expected a boolean");
        }
        result
    }

    fn usize(&self, name: &'static str, min: usize, max: usize) -> Option<usize> {
        let val = self.raw(name)?;
        let result = parse_usize_range(&val, min, max);
        if result.is_none() {
            self.reject(name, val, format!("expected an integer in {min}..={max}"));
        }
        result
    }

    fn list(&self, name: &'static str) -> Option<Vec<String>> {
        let val = self.raw(name)?;
        let result = parse_list(&val);
        if result.is_none() {
            self.reject(name, val, "empty list");
        }
        result
    }

    fn parsed<T>(&self, name: &'static str) -> Option<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let val = self.string(name)?;
        match val.parse() {
            Ok(v) => Some(v),
            Err(e) => {
                self.reject(name, val, e.to_string());
                None
            }
        }
    }
}
