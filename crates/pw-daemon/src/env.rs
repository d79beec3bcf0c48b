// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use crate::lifecycle::LifecycleError;

/// Daemon version string, surfaced in the version file and startup log.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve the state directory: `PULSEWATCH_STATE_DIR` >
/// `XDG_STATE_HOME/pulsewatch` > `~/.local/state/pulsewatch`.
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("PULSEWATCH_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("pulsewatch"));
    }
    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/pulsewatch"))
}

/// Path to the TOML inventory/configuration document.
/// `PULSEWATCH_CONFIG` overrides the default `<state_dir>/config.toml`.
pub fn config_path(state_dir: &std::path::Path) -> PathBuf {
    std::env::var("PULSEWATCH_CONFIG").map(PathBuf::from).unwrap_or_else(|_| state_dir.join("config.toml"))
}
