// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared child-process execution: spawn, capture stdout/stderr, race
//! against a deadline, and kill on expiry.

use std::process::{Output, Stdio};
use std::time::Instant;
use tokio::process::Command;

#[derive(Debug)]
pub(crate) enum RunOutcome {
    Completed(Output),
    TimedOut,
    SpawnFailed(std::io::Error),
}

/// Spawn `command` and wait for it to finish, piping stdout/stderr for
/// capture. If `deadline` passes first, the child is killed and
/// [`RunOutcome::TimedOut`] is returned.
pub(crate) async fn run_with_deadline(mut command: Command, deadline: Instant) -> RunOutcome {
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    command.kill_on_drop(true);

    let child = match command.spawn() {
        Ok(child) => child,
        Err(source) => return RunOutcome::SpawnFailed(source),
    };

    let remaining = deadline.saturating_duration_since(Instant::now());
    match tokio::time::timeout(remaining, child.wait_with_output()).await {
        Ok(Ok(output)) => RunOutcome::Completed(output),
        Ok(Err(source)) => RunOutcome::SpawnFailed(source),
        // Dropping the in-flight future drops the child, which kills it.
        Err(_) => RunOutcome::TimedOut,
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
