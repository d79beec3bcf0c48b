// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sliding-window rate limiting on dispatched notifications, global and
//! per-host. Optional: a zeroed config disables throttling entirely.

use parking_lot::Mutex;
use pw_core::HostId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThrottleConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub window_minutes: u32,
    #[serde(default)]
    pub max_per_host: u32,
    #[serde(default)]
    pub max_total: u32,
}

#[derive(Default)]
struct ThrottleState {
    total: VecDeque<u64>,
    per_host: HashMap<HostId, VecDeque<u64>>,
}

#[derive(Default)]
pub struct Throttle {
    state: Mutex<ThrottleState>,
}

impl Throttle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to admit an event for `host_id` at `now_ms`. Returns `true`
    /// if it may proceed (and records it); `false` if either cap is
    /// exceeded (and the event is counted as dropped, not recorded).
    pub fn admit(&self, config: &ThrottleConfig, host_id: &HostId, now_ms: u64) -> bool {
        if !config.enabled {
            return true;
        }
        let window_ms = u64::from(config.window_minutes) * 60_000;
        let mut state = self.state.lock();

        evict_older_than(&mut state.total, now_ms, window_ms);
        let host_queue = state.per_host.entry(host_id.clone()).or_default();
        evict_older_than(host_queue, now_ms, window_ms);

        let total_len = state.total.len() as u32;
        let host_len = state.per_host.get(host_id).map(|q| q.len() as u32).unwrap_or(0);

        if config.max_total > 0 && total_len >= config.max_total {
            return false;
        }
        if config.max_per_host > 0 && host_len >= config.max_per_host {
            return false;
        }

        state.total.push_back(now_ms);
        state.per_host.entry(host_id.clone()).or_default().push_back(now_ms);
        true
    }
}

fn evict_older_than(queue: &mut VecDeque<u64>, now_ms: u64, window_ms: u64) {
    while let Some(&front) = queue.front() {
        if now_ms.saturating_sub(front) >= window_ms {
            queue.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
#[path = "throttle_tests.rs"]
mod tests;
