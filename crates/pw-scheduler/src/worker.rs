// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker pool: dequeues [`Job`]s, runs them through the matching
//! plugin, and forwards a [`JobOutcome`] to the result handler.
//!
//! Plugins are expected to self-enforce `check.timeout` (see
//! [`pw_plugins::Plugin::execute`]'s contract), but a misbehaving or
//! third-party plugin could still run over. The outer [`tokio::time::timeout`]
//! here is a second, independent backstop: it fires a little after the
//! plugin's own deadline so a well-behaved plugin never trips it.

use crate::job::{Job, JobOutcome};
use pw_core::CheckResult;
use pw_plugins::PluginRegistry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

/// Slack added on top of a check's own timeout before the outer backstop
/// fires, so a plugin racing its own deadline isn't preempted first.
const OUTER_TIMEOUT_MARGIN: Duration = Duration::from_secs(2);

/// Run one job to completion, producing its outcome. Never returns an
/// `Err` — an unknown check type or a runaway plugin both degrade to a
/// synthetic `UNKNOWN` [`CheckResult`], per the "an unknown type yields an
/// error result" rule.
pub async fn run_job(registry: &PluginRegistry, job: Job) -> JobOutcome {
    let Job { host, check } = job;
    let started = Instant::now();

    let result = match registry.get(&check.kind) {
        Some(plugin) => {
            let deadline = started + check.timeout;
            let outer_budget = check.timeout + OUTER_TIMEOUT_MARGIN;
            match tokio::time::timeout(outer_budget, plugin.execute(&check.options, &host, deadline)).await {
                Ok(result) => result,
                Err(_) => CheckResult::unknown(format!(
                    "Check execution failed: check '{}' exceeded its timeout of {:?}",
                    check.id, check.timeout
                )),
            }
        }
        None => CheckResult::unknown(format!("Check execution failed: unknown check type '{}'", check.kind)),
    };

    JobOutcome { host, check, duration: started.elapsed(), result }
}

/// One worker loop: pulls jobs off the shared receiver until the queue
/// closes or shutdown is requested, forwarding outcomes to `results`.
pub async fn run_worker(
    registry: Arc<PluginRegistry>,
    jobs: Arc<Mutex<mpsc::Receiver<Job>>>,
    results: mpsc::Sender<JobOutcome>,
    shutdown: CancellationToken,
) {
    loop {
        let job = {
            let mut jobs = jobs.lock().await;
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => None,
                job = jobs.recv() => job,
            }
        };

        let Some(job) = job else { break };
        let outcome = run_job(&registry, job).await;
        if results.send(outcome).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
