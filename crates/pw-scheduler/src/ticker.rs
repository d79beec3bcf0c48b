// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One scheduling pass (SPEC_FULL §4.4): for every enabled (host, check)
//! pair, decide whether it is due and if so emit a [`Job`].

use crate::config::{SchedulerConfig, MIN_PROBE_INTERVAL};
use crate::job::Job;
use pw_core::{Check, CheckId, Host, HostId, StateInfo};
use pw_tracker::StateTracker;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// The per-state interval from the check's map, falling back to the
/// daemon-wide default when the relevant entry is absent or zero.
pub fn select_interval(check: &Check, state: &StateInfo, default_interval: Duration) -> Duration {
    check.interval.get(state.current_state).unwrap_or(default_interval)
}

/// Step 3: when soft-fail is active and a change is suspected (the pending
/// observation disagrees with what's currently reported), probe three
/// times faster, floored at [`MIN_PROBE_INTERVAL`].
pub fn adaptive_interval(interval: Duration, state: &StateInfo) -> Duration {
    if state.soft_fail_enabled && state.pending_state != state.current_state {
        (interval / 3).max(MIN_PROBE_INTERVAL)
    } else {
        interval
    }
}

/// Deterministic jitter in `[0, 0.1 * interval)`, derived from a hash of
/// the pair identity and its last-check time. Using a hash rather than a
/// fresh random draw means repeated scheduling passes between observations
/// compute the same `next_run` instead of flapping due/not-due as a new
/// random jitter is redrawn each tick.
pub fn jitter_for(host_id: &HostId, check_id: &CheckId, last_check_time_ms: u64, interval: Duration) -> Duration {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    host_id.hash(&mut hasher);
    check_id.hash(&mut hasher);
    last_check_time_ms.hash(&mut hasher);
    let h = hasher.finish();
    let fraction = (h % 1_000_000) as f64 / 1_000_000.0;
    Duration::from_secs_f64(interval.as_secs_f64() * 0.1 * fraction)
}

fn next_run_ms(state: &StateInfo, interval: Duration, jitter: Duration) -> u64 {
    state.last_check_time_ms.saturating_add(interval.as_millis() as u64).saturating_add(jitter.as_millis() as u64)
}

/// One scheduling pass. Seeds `StateInfo` for any pair not yet seen, then
/// emits at most one `Job` per enabled (host, check) pair that is due.
pub fn due_jobs(
    checks: &[Check],
    hosts_by_id: &HashMap<HostId, Host>,
    tracker: &StateTracker,
    config: &SchedulerConfig,
    now_ms: u64,
) -> Vec<Job> {
    let mut jobs = Vec::new();

    for check in checks {
        if !check.enabled {
            continue;
        }
        for host_id in &check.hosts {
            let Some(host) = hosts_by_id.get(host_id) else { continue };
            if !host.enabled {
                continue;
            }

            tracker.seed(host_id.clone(), check.id.clone(), None, check.threshold, config.soft_fail_enabled, now_ms);
            let Some(state) = tracker.get(host_id, &check.id) else { continue };

            let interval = select_interval(check, &state, config.default_interval);
            let interval = adaptive_interval(interval, &state);
            let jitter = jitter_for(host_id, &check.id, state.last_check_time_ms, interval);
            let due_at = next_run_ms(&state, interval, jitter);

            if now_ms >= due_at {
                jobs.push(Job { host: host.clone(), check: check.clone() });
            }
        }
    }

    jobs
}

#[cfg(test)]
#[path = "ticker_tests.rs"]
mod tests;
