// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler-wide defaults (SPEC_FULL §6 configuration surface:
//! `server.workers`, `monitoring.default_interval`,
//! `monitoring.default_threshold`, `monitoring.soft_fail_enabled`).

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_workers() -> usize {
    3
}

fn default_tick_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_threshold() -> u32 {
    1
}

fn default_queue_capacity() -> usize {
    256
}

/// Floor applied to an adaptively-shortened interval (§4.4 step 3).
pub const MIN_PROBE_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_tick_interval", with = "duration_secs")]
    pub tick_interval: Duration,
    #[serde(default = "default_interval", with = "duration_secs")]
    pub default_interval: Duration,
    #[serde(default = "default_threshold")]
    pub default_threshold: u32,
    #[serde(default = "default_true")]
    pub soft_fail_enabled: bool,
    #[serde(default = "default_queue_capacity")]
    pub job_queue_capacity: usize,
    #[serde(default = "default_queue_capacity")]
    pub result_queue_capacity: usize,
}

fn default_true() -> bool {
    true
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_secs().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            tick_interval: default_tick_interval(),
            default_interval: default_interval(),
            default_threshold: default_threshold(),
            soft_fail_enabled: true,
            job_queue_capacity: default_queue_capacity(),
            result_queue_capacity: default_queue_capacity(),
        }
    }
}
