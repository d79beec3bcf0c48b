// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The unit of work moving through the job/result queues.

use pw_core::{Check, CheckResult, Host};
use std::time::Duration;

/// `QUEUED -> RUNNING -> COMPLETED` in terms of this type's lifecycle: a
/// `Job` is queued, a worker turns it into a `JobOutcome` once run.
#[derive(Debug, Clone)]
pub struct Job {
    pub host: Host,
    pub check: Check,
}

#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub host: Host,
    pub check: Check,
    pub result: CheckResult,
    pub duration: Duration,
}
