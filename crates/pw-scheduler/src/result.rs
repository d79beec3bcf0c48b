// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The result handler: consumes [`JobOutcome`]s, runs them through the
//! soft-fail state machine, persists the reported [`Status`], records
//! metrics, and hands off to the notification pipeline.
//!
//! Dispatch is asynchronous (§4.5): this loop spawns the pipeline call and
//! moves straight on to the next outcome rather than waiting for channels
//! to finish sending.

use crate::job::JobOutcome;
use crate::metrics::MetricsSink;
use pw_core::{ExitCode, Status};
use pw_notify::{NotificationEvent, NotificationPipeline};
use pw_store::StatusStore;
use pw_tracker::StateTracker;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Apply one outcome: soft-fail, persist, meter, notify. Returns the
/// [`Status`] that was persisted, mainly so tests can assert on it.
pub fn apply_outcome(
    tracker: &StateTracker,
    store: &StatusStore,
    metrics: &dyn MetricsSink,
    outcome: &JobOutcome,
    threshold: u32,
    soft_fail_master_enabled: bool,
    now_ms: u64,
) -> Result<(Status, ExitCode), crate::error::SchedulerError> {
    let host_id = outcome.host.id.clone();
    let check_id = outcome.check.id.clone();

    let previous = tracker.get(&host_id, &check_id).map(|s| s.current_state).unwrap_or(ExitCode::Unknown);

    let state = tracker.observe_full(
        host_id.clone(),
        check_id.clone(),
        outcome.result.exit_code,
        threshold,
        soft_fail_master_enabled,
        now_ms,
    );

    let status = Status::from_soft_fail(
        host_id.clone(),
        check_id.clone(),
        state.current_state,
        &outcome.result,
        state.consecutive_count,
        state.threshold,
        now_ms,
    );

    store.update_status(status.clone())?;
    metrics.record_check(&host_id, &check_id, outcome.result.exit_code, outcome.duration);

    Ok((status, previous))
}

/// The result-handler loop: drains `results` until the channel closes,
/// applying each outcome and firing a detached notification-pipeline call
/// per transition.
pub async fn run_result_handler(
    tracker: Arc<StateTracker>,
    store: Arc<StatusStore>,
    metrics: Arc<dyn MetricsSink>,
    pipeline: Arc<NotificationPipeline>,
    soft_fail_master_enabled: bool,
    mut results: mpsc::Receiver<JobOutcome>,
    shutdown: CancellationToken,
) {
    loop {
        let outcome = tokio::select! {
            biased;
            outcome = results.recv() => outcome,
            _ = shutdown.cancelled() => {
                // Drain whatever already landed in the channel before exiting.
                match results.try_recv() {
                    Ok(outcome) => Some(outcome),
                    Err(_) => None,
                }
            }
        };

        let Some(outcome) = outcome else { break };
        let now_ms = outcome_timestamp_ms();

        let applied = apply_outcome(
            &tracker,
            &store,
            metrics.as_ref(),
            &outcome,
            outcome.check.threshold,
            soft_fail_master_enabled,
            now_ms,
        );

        let (status, previous) = match applied {
            Ok(pair) => pair,
            Err(error) => {
                tracing::error!(%error, host = %outcome.host.id, check = %outcome.check.id, "failed to persist check result");
                continue;
            }
        };

        let event = NotificationEvent {
            host: outcome.host.clone(),
            check: outcome.check.clone(),
            is_recovery: pw_notify::is_recovery(previous, status.exit_code),
            previous_exit: previous,
            status,
            timestamp_ms: now_ms,
        };

        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move {
            pipeline.handle_transition(event, now_ms).await;
        });
    }
}

fn outcome_timestamp_ms() -> u64 {
    u64::try_from(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
    )
    .unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
