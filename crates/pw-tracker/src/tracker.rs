// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The soft-fail state machine: turns an *observed* check outcome into the
//! *reported* outcome that gets persisted and notified on.

use pw_core::{CheckId, ExitCode, HostId, StateInfo};

/// Apply one new observation to `state`, mutating it in place and returning
/// the newly reported exit code.
///
/// Transition rules, evaluated in order:
/// 1. Soft-fail off: report the observation as-is.
/// 2. Soft-fail on: track consecutive observations of the same pending
///    value, resetting the run whenever the observed value changes.
/// 3. Recoveries (`OK`) promote immediately; degradations promote once the
///    consecutive run reaches the check's threshold.
/// 4. On promotion, reset the consecutive count and stamp the state-change
///    time if the reported value actually changed.
/// 5. The last-check time always advances.
pub fn observe(state: &mut StateInfo, observed: ExitCode, now_ms: u64) -> ExitCode {
    if !state.soft_fail_enabled {
        if state.current_state != observed {
            state.last_state_change_ms = now_ms;
        }
        state.current_state = observed;
        state.pending_state = observed;
        state.consecutive_count = 1;
        state.last_check_time_ms = now_ms;
        return state.current_state;
    }

    if observed == state.pending_state {
        state.consecutive_count += 1;
    } else {
        state.pending_state = observed;
        state.consecutive_count = 1;
    }

    let should_promote = observed == ExitCode::Ok || state.consecutive_count >= state.threshold;

    if should_promote {
        if observed != state.current_state {
            state.last_state_change_ms = now_ms;
        }
        state.current_state = observed;
        state.consecutive_count = 1;
    }

    state.last_check_time_ms = now_ms;
    state.current_state
}

/// Per-(host, check) [`StateInfo`] map, mediated by a single lock so
/// observations for a given pair are always serialized.
pub struct StateTracker {
    states: parking_lot::Mutex<std::collections::HashMap<(HostId, CheckId), StateInfo>>,
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StateTracker {
    pub fn new() -> Self {
        Self { states: parking_lot::Mutex::new(std::collections::HashMap::new()) }
    }

    /// Seed a pair from its latest persisted status (or `None` on first
    /// sighting), per the §4.3 initialization rule.
    pub fn seed(
        &self,
        host_id: HostId,
        check_id: CheckId,
        seed: Option<ExitCode>,
        threshold: u32,
        soft_fail_master_enabled: bool,
        now_ms: u64,
    ) {
        let mut states = self.states.lock();
        states
            .entry((host_id, check_id))
            .or_insert_with(|| StateInfo::seed(seed, threshold, soft_fail_master_enabled, now_ms));
    }

    /// Feed an observed exit code through the state machine for `(host_id,
    /// check_id)`, creating the pair's [`StateInfo`] on first sighting if it
    /// was never seeded. Returns the reported exit code.
    pub fn observe(
        &self,
        host_id: HostId,
        check_id: CheckId,
        observed: ExitCode,
        threshold: u32,
        soft_fail_master_enabled: bool,
        now_ms: u64,
    ) -> ExitCode {
        let mut states = self.states.lock();
        let state = states
            .entry((host_id, check_id))
            .or_insert_with(|| StateInfo::seed(None, threshold, soft_fail_master_enabled, now_ms));
        observe(state, observed, now_ms)
    }

    /// Like [`Self::observe`], but returns the full post-mutation
    /// [`StateInfo`] (consecutive count and threshold included) instead of
    /// just the reported code, so callers that need both in one pass (the
    /// scheduler's result handler, composing a `Status`) don't take the
    /// lock twice.
    pub fn observe_full(
        &self,
        host_id: HostId,
        check_id: CheckId,
        observed: ExitCode,
        threshold: u32,
        soft_fail_master_enabled: bool,
        now_ms: u64,
    ) -> StateInfo {
        let mut states = self.states.lock();
        let state = states
            .entry((host_id, check_id))
            .or_insert_with(|| StateInfo::seed(None, threshold, soft_fail_master_enabled, now_ms));
        observe(state, observed, now_ms);
        state.clone()
    }

    pub fn get(&self, host_id: &HostId, check_id: &CheckId) -> Option<StateInfo> {
        let states = self.states.lock();
        states.get(&(host_id.clone(), check_id.clone())).cloned()
    }

    pub fn remove(&self, host_id: &HostId, check_id: &CheckId) {
        let mut states = self.states.lock();
        states.remove(&(host_id.clone(), check_id.clone()));
    }

    pub fn len(&self) -> usize {
        self.states.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
