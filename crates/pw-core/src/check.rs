// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Check definitions: what to run, where, how often, and how long to wait.

use crate::ExitCode;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Identifier for a check definition. Like [`crate::HostId`], operator-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(pub String);

impl CheckId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CheckId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CheckId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for CheckId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CheckId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for CheckId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Per-state poll intervals. Looked up by the scheduler keyed on a pair's
/// currently reported [`ExitCode`]; a missing or zero entry falls back to
/// the daemon-wide default interval (see `SchedulerConfig::default_interval`
/// in `pw-scheduler`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalMap {
    #[serde(default)]
    pub ok: Option<Duration>,
    #[serde(default)]
    pub warning: Option<Duration>,
    #[serde(default)]
    pub critical: Option<Duration>,
    #[serde(default)]
    pub unknown: Option<Duration>,
}

impl IntervalMap {
    pub fn get(&self, state: ExitCode) -> Option<Duration> {
        let entry = match state {
            ExitCode::Ok => self.ok,
            ExitCode::Warning => self.warning,
            ExitCode::Critical => self.critical,
            ExitCode::Unknown => self.unknown,
        };
        entry.filter(|d| !d.is_zero())
    }
}

/// A check definition: one plugin invocation, applied to a set of hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub id: CheckId,
    pub name: String,
    /// Plugin registry key, e.g. "ping" or "script".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub hosts: Vec<crate::HostId>,
    #[serde(default)]
    pub interval: IntervalMap,
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub options: HashMap<String, String>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

fn default_threshold() -> u32 {
    1
}

fn default_enabled() -> bool {
    true
}

impl Check {
    /// Soft-fail is only active when the check's own threshold calls for it.
    /// Whether it is *honored* also depends on the daemon-wide
    /// `monitoring.soft_fail_enabled` switch — see `StateInfo::soft_fail_enabled`.
    pub fn wants_soft_fail(&self) -> bool {
        self.threshold > 1
    }
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

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct CheckBuilder => Check {
        into {
            name: String = "check",
            id: CheckId = CheckId::new("check-1"),
            kind: String = "ping",
        }
        set {
            hosts: Vec<crate::HostId> = Vec::new(),
            interval: IntervalMap = IntervalMap::default(),
            threshold: u32 = 1,
            timeout: Duration = Duration::from_secs(10),
            enabled: bool = true,
            created_at_ms: u64 = 0,
            updated_at_ms: u64 = 0,
        }
        computed {
            options: HashMap<String, String> = HashMap::new(),
        }
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
