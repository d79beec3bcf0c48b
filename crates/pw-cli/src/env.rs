// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the running daemon's state directory. Duplicated from the
//! daemon's own resolution logic rather than shared via a dependency, since
//! the CLI only ever reads this one value.

use std::path::PathBuf;

/// Resolve the state directory: `PULSEWATCH_STATE_DIR` >
/// `XDG_STATE_HOME/pulsewatch` > `~/.local/state/pulsewatch`.
pub fn state_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("PULSEWATCH_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("pulsewatch"));
    }
    let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("could not determine home directory"))?;
    Ok(PathBuf::from(home).join(".local/state/pulsewatch"))
}
