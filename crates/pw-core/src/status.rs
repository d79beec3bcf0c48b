// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transient check outcomes and the persisted status records derived from them.

use crate::{CheckId, ExitCode, HostId};
use serde::{Deserialize, Serialize};

/// Raw outcome of one plugin invocation, before soft-fail filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub exit_code: ExitCode,
    pub output: String,
    #[serde(default)]
    pub perf_data: String,
    #[serde(default)]
    pub long_output: String,
    #[serde(with = "duration_millis")]
    pub duration: std::time::Duration,
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        (d.as_millis() as u64).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}

impl CheckResult {
    pub fn unknown(output: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Unknown,
            output: output.into(),
            perf_data: String::new(),
            long_output: String::new(),
            duration: std::time::Duration::ZERO,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct CheckResultBuilder => CheckResult {
        into {
            output: String = "ok",
        }
        set {
            exit_code: ExitCode = ExitCode::Ok,
            perf_data: String = String::new(),
            long_output: String = String::new(),
            duration: std::time::Duration = std::time::Duration::ZERO,
        }
    }
}

/// A persisted status record: the *reported* exit code (possibly rewritten
/// by the soft-fail state machine) plus the plugin's observation detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub host_id: HostId,
    pub check_id: CheckId,
    pub exit_code: ExitCode,
    pub output: String,
    #[serde(default)]
    pub perf_data: String,
    #[serde(default)]
    pub long_output: String,
    pub duration_ms: u64,
    pub timestamp_ms: u64,
}

impl Status {
    /// Rewrite a status so it surfaces the soft-fail masking to an operator
    /// reading history: `observed` was the raw result, `reported` is what
    /// gets persisted as `exit_code`.
    pub fn from_soft_fail(
        host_id: HostId,
        check_id: CheckId,
        reported: ExitCode,
        observed: &CheckResult,
        count: u32,
        threshold: u32,
        timestamp_ms: u64,
    ) -> Self {
        let (output, long_output) = if observed.exit_code != reported {
            (
                format!("SOFT FAIL ({count}/{threshold}) - {}", observed.output),
                format!(
                    "observed={} reported={}\n{}",
                    observed.exit_code, reported, observed.long_output
                ),
            )
        } else {
            (observed.output.clone(), observed.long_output.clone())
        };
        Self {
            host_id,
            check_id,
            exit_code: reported,
            output,
            perf_data: observed.perf_data.clone(),
            long_output,
            duration_ms: observed.duration.as_millis() as u64,
            timestamp_ms,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct StatusBuilder => Status {
        into {
            host_id: HostId = HostId::new("h1"),
            check_id: CheckId = CheckId::new("c1"),
            output: String = "ok",
        }
        set {
            exit_code: ExitCode = ExitCode::Ok,
            perf_data: String = String::new(),
            long_output: String = String::new(),
            duration_ms: u64 = 0,
            timestamp_ms: u64 = 0,
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
