// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("plugin init failed: {0}")]
    InitFailed(String),
    #[error("missing required option '{0}'")]
    MissingOption(String),
    #[error("failed to spawn plugin process: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("plugin process execution error: {0}")]
    Execution(String),
}
