// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors a [`crate::Channel`] returns for a single send attempt.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("transient send failure: {0}")]
    Transient(String),
    #[error("permanent send failure: {0}")]
    Permanent(String),
    /// HTTP 429: transient, but retry should wait at least `retry_after`.
    #[error("rate limited, retry after {retry_after:?}: {message}")]
    RateLimited { retry_after: Option<std::time::Duration>, message: String },
}

impl ChannelError {
    pub fn is_transient(&self) -> bool {
        !matches!(self, ChannelError::Permanent(_))
    }
}
