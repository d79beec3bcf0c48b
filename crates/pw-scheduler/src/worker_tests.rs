// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pw_core::test_support::{test_check, test_host};
use pw_core::ExitCode;
use pw_plugins::test_support::{FakePlugin, SlowFakePlugin};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn run_job_returns_the_plugin_result_on_success() {
    let mut registry = PluginRegistry::empty();
    registry.register(Arc::new(FakePlugin::new(pw_core::CheckResult {
        exit_code: ExitCode::Ok,
        output: "pong".into(),
        perf_data: String::new(),
        long_output: String::new(),
        duration: Duration::ZERO,
    })));

    let host = test_host("a");
    let mut check = test_check("c", vec![host.id.clone()], 1);
    check.kind = "fake".into();

    let outcome = run_job(&registry, Job { host, check }).await;
    assert_eq!(outcome.result.exit_code, ExitCode::Ok);
    assert_eq!(outcome.result.output, "pong");
}

#[tokio::test]
async fn run_job_yields_unknown_for_an_unregistered_check_type() {
    let registry = PluginRegistry::empty();
    let host = test_host("a");
    let mut check = test_check("c", vec![host.id.clone()], 1);
    check.kind = "does-not-exist".into();

    let outcome = run_job(&registry, Job { host, check }).await;
    assert_eq!(outcome.result.exit_code, ExitCode::Unknown);
    assert!(outcome.result.output.starts_with("Check execution failed: "));
    assert!(outcome.result.output.contains("unknown check type"));
}

#[tokio::test(start_paused = true)]
async fn run_job_enforces_the_outer_deadline_against_a_misbehaving_plugin() {
    let mut registry = PluginRegistry::empty();
    registry.register(Arc::new(SlowFakePlugin { sleep: Duration::from_secs(600) }));

    let host = test_host("a");
    let mut check = test_check("c", vec![host.id.clone()], 1);
    check.kind = "slow-fake".into();
    check.timeout = Duration::from_secs(5);

    let handle = tokio::spawn(async move { run_job(&registry, Job { host, check }).await });
    tokio::time::advance(Duration::from_secs(10)).await;
    let outcome = handle.await.expect("worker task panicked");

    assert_eq!(outcome.result.exit_code, ExitCode::Unknown);
    assert!(outcome.result.output.starts_with("Check execution failed: "));
    assert!(outcome.result.output.contains("exceeded its timeout"));
}

#[tokio::test]
async fn run_worker_drains_the_queue_then_exits_on_channel_close() {
    let mut registry = PluginRegistry::empty();
    registry.register(Arc::new(FakePlugin::new(pw_core::CheckResult::unknown("n/a"))));
    let registry = Arc::new(registry);

    let (job_tx, job_rx) = mpsc::channel(4);
    let (result_tx, mut result_rx) = mpsc::channel(4);
    let jobs = Arc::new(Mutex::new(job_rx));
    let shutdown = CancellationToken::new();

    let host = test_host("a");
    let mut check = test_check("c", vec![host.id.clone()], 1);
    check.kind = "fake".into();
    job_tx.send(Job { host: host.clone(), check: check.clone() }).await.expect("send job");
    drop(job_tx);

    run_worker(registry, jobs, result_tx, shutdown).await;

    let outcome = result_rx.recv().await.expect("expected one outcome");
    assert_eq!(outcome.check.id, check.id);
    assert!(result_rx.recv().await.is_none());
}

#[tokio::test]
async fn run_worker_stops_pulling_new_jobs_once_cancelled() {
    let registry = Arc::new(PluginRegistry::empty());
    let (_job_tx, job_rx) = mpsc::channel(4);
    let (result_tx, _result_rx) = mpsc::channel(4);
    let jobs = Arc::new(Mutex::new(job_rx));
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    // Returns promptly rather than blocking forever on an empty, open queue.
    tokio::time::timeout(Duration::from_secs(1), run_worker(registry, jobs, result_tx, shutdown))
        .await
        .expect("worker should exit promptly once cancelled");
}
