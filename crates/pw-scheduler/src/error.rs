// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("unknown check type: {0}")]
    UnknownCheckType(String),
    #[error(transparent)]
    Store(#[from] pw_store::StoreError),
}
