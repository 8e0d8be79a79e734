//! XDG-style path utilities for configuration and cache directories.
//!
//! XDG Base Directory variables take precedence over the home-relative
//! defaults on every platform.

use std::path::PathBuf;

use crate::error::AppError;

const APP_NAME: &str = "clijp";

/// Returns the configuration directory for clijp.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/clijp` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/clijp` otherwise
pub fn config_dir() -> Result<PathBuf, AppError> {
    resolve("XDG_CONFIG_HOME", ".config")
}

/// Returns the cache directory for clijp.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/clijp` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/clijp` otherwise
pub fn cache_dir() -> Result<PathBuf, AppError> {
    resolve("XDG_CACHE_HOME", ".cache")
}

fn resolve(xdg_var: &str, home_relative: &str) -> Result<PathBuf, AppError> {
    match std::env::var(xdg_var) {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_NAME)),
        _ => Ok(home_dir()?.join(home_relative).join(APP_NAME)),
    }
}

fn home_dir() -> Result<PathBuf, AppError> {
    dirs::home_dir().ok_or(AppError::HomeDir)
}
