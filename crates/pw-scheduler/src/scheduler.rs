// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the ticker, worker pool, and result handler into a single running
//! scheduler, and coordinates graceful shutdown across all three (§5).

use crate::config::SchedulerConfig;
use crate::job::{Job, JobOutcome};
use crate::metrics::MetricsSink;
use crate::ticker::due_jobs;
use crate::worker::run_worker;
use pw_notify::NotificationPipeline;
use pw_plugins::PluginRegistry;
use pw_store::StatusStore;
use pw_tracker::StateTracker;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A running scheduler: ticker, worker pool, and result handler, each its
/// own task, all cancelled together on [`Scheduler::shutdown`].
pub struct Scheduler {
    shutdown: CancellationToken,
    ticker_handle: JoinHandle<()>,
    worker_handles: Vec<JoinHandle<()>>,
    result_handle: JoinHandle<()>,
}

impl Scheduler {
    /// Start every task. `now_ms` is only used to seed the first tick;
    /// subsequent ticks read wall-clock time themselves.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        config: SchedulerConfig,
        registry: Arc<PluginRegistry>,
        store: Arc<StatusStore>,
        tracker: Arc<StateTracker>,
        metrics: Arc<dyn MetricsSink>,
        pipeline: Arc<NotificationPipeline>,
        soft_fail_master_enabled: bool,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let (job_tx, job_rx) = mpsc::channel::<Job>(config.job_queue_capacity);
        let (result_tx, result_rx) = mpsc::channel::<JobOutcome>(config.result_queue_capacity);
        let job_rx = Arc::new(Mutex::new(job_rx));

        let worker_handles = (0..config.workers.max(1))
            .map(|_| {
                tokio::spawn(run_worker(Arc::clone(&registry), Arc::clone(&job_rx), result_tx.clone(), shutdown.clone()))
            })
            .collect();
        drop(result_tx);

        let result_handle = tokio::spawn(crate::result::run_result_handler(
            Arc::clone(&tracker),
            Arc::clone(&store),
            Arc::clone(&metrics),
            Arc::clone(&pipeline),
            soft_fail_master_enabled,
            result_rx,
            shutdown.clone(),
        ));

        let ticker_handle = tokio::spawn(run_ticker(config, store, tracker, metrics, job_tx, shutdown.clone()));

        Self { shutdown, ticker_handle, worker_handles, result_handle }
    }

    /// Stop the ticker first, let in-flight jobs finish, then let the
    /// result handler drain whatever already landed before it, too, exits.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        let _ = self.ticker_handle.await;
        for handle in self.worker_handles {
            let _ = handle.await;
        }
        let _ = self.result_handle.await;
    }
}

async fn run_ticker(
    config: SchedulerConfig,
    store: Arc<StatusStore>,
    tracker: Arc<StateTracker>,
    metrics: Arc<dyn MetricsSink>,
    jobs: mpsc::Sender<Job>,
    shutdown: CancellationToken,
) {
    let mut interval = tokio::time::interval(config.tick_interval);
    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = interval.tick() => {}
        }

        let checks = store.get_checks();
        let hosts_by_id = store.get_hosts().into_iter().map(|h| (h.id.clone(), h)).collect();
        let now_ms = now_epoch_ms();

        let due = due_jobs(&checks, &hosts_by_id, &tracker, &config, now_ms);
        metrics.queue_depth(due.len());

        let mut dropped = 0usize;
        for job in due {
            if jobs.try_send(job).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::warn!(dropped, "job queue full, dropping due checks this tick");
            metrics.jobs_dropped(dropped);
        }
    }
}

fn now_epoch_ms() -> u64 {
    u64::try_from(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
    )
    .unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
