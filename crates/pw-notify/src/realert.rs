// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repeat-notification scheduling for a sustained non-OK state. The
//! schedule resets whenever the pair's reported state changes.

use parking_lot::Mutex;
use pw_core::{CheckId, ExitCode, HostId};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct RealertState {
    exit_code: ExitCode,
    last_sent_ms: u64,
    sent_count: u32,
}

/// Per-(host,check) realert bookkeeping, keyed independently of the state
/// tracker so the notification pipeline doesn't need a dependency on it.
#[derive(Default)]
pub struct RealertLedger {
    inner: Mutex<HashMap<(HostId, CheckId), RealertState>>,
}

impl RealertLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an initial (non-realert) notification was just sent for
    /// this pair's current non-OK state.
    pub fn record_initial_send(&self, host_id: HostId, check_id: CheckId, exit_code: ExitCode, now_ms: u64) {
        self.inner
            .lock()
            .insert((host_id, check_id), RealertState { exit_code, last_sent_ms: now_ms, sent_count: 0 });
    }

    /// A state change (recovery, degradation, or lateral change) clears any
    /// pending realert schedule for the pair — the next notify starts fresh.
    pub fn clear(&self, host_id: &HostId, check_id: &CheckId) {
        self.inner.lock().remove(&(host_id.clone(), check_id.clone()));
    }

    /// Whether a realert is due right now for `(host_id, check_id)` still in
    /// `exit_code`, given `interval` cadence and `max` cap. Advances the
    /// ledger and returns `true` if so.
    pub fn due(
        &self,
        host_id: &HostId,
        check_id: &CheckId,
        exit_code: ExitCode,
        interval: Duration,
        max: u32,
        now_ms: u64,
    ) -> bool {
        if max == 0 || interval.is_zero() {
            return false;
        }
        let mut guard = self.inner.lock();
        let Some(state) = guard.get_mut(&(host_id.clone(), check_id.clone())) else {
            return false;
        };
        if state.exit_code != exit_code {
            return false;
        }
        if state.sent_count >= max {
            return false;
        }
        let elapsed_ms = now_ms.saturating_sub(state.last_sent_ms);
        if elapsed_ms < interval.as_millis() as u64 {
            return false;
        }
        state.last_sent_ms = now_ms;
        state.sent_count += 1;
        true
    }
}

#[cfg(test)]
#[path = "realert_tests.rs"]
mod tests;
