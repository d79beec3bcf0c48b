// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Distinguishes a malformed document from one that parses but fails a
/// semantic check, so callers can report which key is at fault.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse inventory document: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },
}
