// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pulsewatch Daemon (pulsewatchd)
//!
//! Background process that owns the scheduling loop: ticks due checks out
//! to a worker pool, applies their results to the status store, and hands
//! state transitions off to the notification pipeline.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod env;
mod lifecycle;

use std::time::Duration;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::lifecycle::{Config, LifecycleError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("pulsewatchd {}", crate::env::VERSION);
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("pulsewatchd {}", crate::env::VERSION);
                println!("Pulsewatch Daemon - distributed host/service monitoring");
                println!();
                println!("USAGE:");
                println!("    pulsewatchd");
                println!();
                println!("Reads its configuration and host/check inventory from");
                println!("PULSEWATCH_CONFIG (default: <state dir>/config.toml) and runs");
                println!("until terminated. Use the `pulsewatch` CLI to inspect state.");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: pulsewatchd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;
    rotate_log_if_needed(&config.log_path);
    write_startup_marker(&config)?;
    let log_guard = setup_logging(&config)?;

    info!("starting pulsewatch daemon");

    let state = match lifecycle::startup(config.clone()) {
        Ok(state) => state,
        Err(LifecycleError::LockFailed(_)) => {
            let pid = std::fs::read_to_string(&config.lock_path).unwrap_or_default().trim().to_string();
            eprintln!("pulsewatchd is already running");
            if !pid.is_empty() {
                eprintln!("  pid: {pid}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            write_startup_error(&config, &e);
            error!(error = %e, "failed to start daemon");
            drop(log_guard);
            return Err(e.into());
        }
    };

    let scheduler = state.start_scheduler();
    spawn_purge_task(
        std::sync::Arc::clone(&state.store),
        state.daemon_config.purge_interval,
        state.daemon_config.history_retention,
        state.daemon_config.hosts.iter().map(|h| h.id.clone()).collect(),
        state.daemon_config.checks.iter().map(|c| c.id.clone()).collect(),
    );
    spawn_realert_task(
        std::sync::Arc::clone(&state.store),
        std::sync::Arc::clone(&state.pipeline),
        state.daemon_config.scheduler.tick_interval,
    );

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    println!("READY");
    info!("daemon ready");

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    scheduler.shutdown().await;
    state.shutdown()?;
    info!("daemon stopped");
    Ok(())
}

/// Periodic orphan sweep and history trim (§5 "one purge task").
fn spawn_purge_task(
    store: std::sync::Arc<pw_store::StatusStore>,
    purge_interval: Duration,
    history_retention: Duration,
    desired_hosts: std::collections::HashSet<pw_core::HostId>,
    desired_checks: std::collections::HashSet<pw_core::CheckId>,
) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(purge_interval);
        loop {
            interval.tick().await;
            let (hosts_removed, checks_removed) = pw_inventory::purge_orphans(&store, &desired_hosts, &desired_checks);
            if hosts_removed > 0 || checks_removed > 0 {
                info!(hosts_removed, checks_removed, "purged orphaned inventory entries");
            }
            let cutoff = now_epoch_ms().saturating_sub(history_retention.as_millis() as u64);
            match store.delete_status_history_before(cutoff) {
                Ok(removed) if removed > 0 => info!(removed, "trimmed expired status history"),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "failed to trim status history"),
            }
        }
    });
}

/// Periodic realert sweep (§4.5): re-dispatches for non-OK pairs whose
/// cadence has elapsed. Due-ness and the resend cap are enforced inside
/// `poll_realert`/`RealertLedger`, so ticking this faster than the
/// configured realert interval is harmless.
fn spawn_realert_task(store: std::sync::Arc<pw_store::StatusStore>, pipeline: std::sync::Arc<pw_notify::NotificationPipeline>, poll_interval: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(poll_interval);
        loop {
            interval.tick().await;
            let now_ms = now_epoch_ms();
            for status in store.get_statuses(&pw_store::StatusFilter::default()) {
                if status.exit_code == pw_core::ExitCode::Ok {
                    continue;
                }
                let Some(host) = store.get_host(&status.host_id) else { continue };
                let Some(check) = store.get_check(&status.check_id) else { continue };
                pipeline.poll_realert(&host, &check, &status, now_ms).await;
            }
        }
    });
}

fn now_epoch_ms() -> u64 {
    u64::try_from(std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap_or_default().as_millis()).unwrap_or(u64::MAX)
}

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;
const MAX_ROTATED_LOGS: u32 = 3;

/// Rotate the daemon log file if it exceeds [`MAX_LOG_SIZE`].
fn rotate_log_if_needed(log_path: &std::path::Path) {
    let size = match std::fs::metadata(log_path) {
        Ok(m) => m.len(),
        Err(_) => return,
    };
    if size < MAX_LOG_SIZE {
        return;
    }
    let log_str = log_path.display().to_string();
    for i in (1..MAX_ROTATED_LOGS).rev() {
        let from = format!("{log_str}.{i}");
        let to = format!("{log_str}.{}", i + 1);
        let _ = std::fs::rename(&from, &to);
    }
    let _ = std::fs::rename(log_path, format!("{log_str}.1"));
}

const STARTUP_MARKER_PREFIX: &str = "--- pulsewatchd: starting (pid: ";

fn write_startup_marker(config: &Config) -> Result<(), LifecycleError> {
    use std::io::Write;
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(&config.log_path)?;
    writeln!(file, "{}{}) ---\n", STARTUP_MARKER_PREFIX, std::process::id())?;
    Ok(())
}

fn write_startup_error(config: &Config, error: &LifecycleError) {
    use std::io::Write;
    let Ok(mut file) = std::fs::OpenOptions::new().create(true).append(true).open(&config.log_path) else {
        return;
    };
    let _ = writeln!(file, "ERROR failed to start daemon: {error}");
}

fn setup_logging(config: &Config) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(LifecycleError::NoStateDir)?,
        config.log_path.file_name().ok_or(LifecycleError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking)).init();
    Ok(guard)
}
