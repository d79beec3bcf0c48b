// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-(host,check) state held by the soft-fail tracker.
//!
//! The transition function that mutates this struct lives in `pw-tracker`;
//! this module only defines the shape so other crates (store snapshots,
//! CLI inspection) can read it without depending on the tracker crate.

use crate::ExitCode;
use serde::{Deserialize, Serialize};

/// Soft-fail bookkeeping for one (host, check) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateInfo {
    /// The state currently being reported to downstream consumers.
    pub current_state: ExitCode,
    /// The last observed (raw) check outcome.
    pub pending_state: ExitCode,
    /// Consecutive observations equal to `pending_state`.
    pub consecutive_count: u32,
    pub last_state_change_ms: u64,
    pub last_check_time_ms: u64,
    pub soft_fail_enabled: bool,
    pub threshold: u32,
}

impl StateInfo {
    /// Seed a fresh pair. `seed` is the latest persisted status's exit code,
    /// if any (§4.3 Initialization); absent a prior status, seed `Unknown`.
    pub fn seed(seed: Option<ExitCode>, threshold: u32, soft_fail_master_enabled: bool, now_ms: u64) -> Self {
        let state = seed.unwrap_or(ExitCode::Unknown);
        Self {
            current_state: state,
            pending_state: state,
            consecutive_count: 1,
            last_state_change_ms: now_ms,
            last_check_time_ms: now_ms,
            soft_fail_enabled: soft_fail_master_enabled && threshold > 1,
            threshold: threshold.max(1),
        }
    }
}

#[cfg(test)]
#[path = "state_info_tests.rs"]
mod tests;
