// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transition detection: deciding whether a reported-state change is
//! notify-worthy, and the event payload handed to the dispatch pipeline.

use pw_core::{Check, ExitCode, Host, Status};

/// Snapshot of everything a channel or override rule might need about a
/// single state transition.
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    pub host: Host,
    pub check: Check,
    pub status: Status,
    pub previous_exit: ExitCode,
    pub timestamp_ms: u64,
    pub is_recovery: bool,
}

impl NotificationEvent {
    pub fn current_exit(&self) -> ExitCode {
        self.status.exit_code
    }
}

/// Trigger rules (SPEC_FULL §4.5):
/// - Recovery: previous != OK, current == OK.
/// - Degradation: previous == OK, current != OK.
/// - Lateral change between non-OK states: previous != OK, current != OK, previous != current.
/// Never fires on OK->OK or an identical repeat.
pub fn should_notify(previous: ExitCode, current: ExitCode) -> bool {
    use ExitCode::Ok as ExitOk;
    match (previous, current) {
        (ExitOk, ExitOk) => false,
        (p, ExitOk) if p != ExitOk => true,
        (ExitOk, c) if c != ExitOk => true,
        (p, c) if p != ExitOk && c != ExitOk && p != c => true,
        _ => false,
    }
}

pub fn is_recovery(previous: ExitCode, current: ExitCode) -> bool {
    previous != ExitCode::Ok && current == ExitCode::Ok
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
