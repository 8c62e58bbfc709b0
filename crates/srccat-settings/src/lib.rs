//! # srccat-settings
//!
//! Configuration management with layered sources for srccat.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`SrccatSettings::default()`]
//! 2. **User file** — `~/.srccat/settings.json` or an explicit path (deep-merged over defaults)
//! 3. **Environment variables** — `SRCCAT_*` overrides (highest priority)
//!
//! Command-line flags are layered on top by the binary.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    RejectedOverride, apply_env_overrides, apply_overrides, deep_merge, load_settings,
    load_settings_from_path, load_settings_with_rejected, settings_path,
};
pub use types::*;
