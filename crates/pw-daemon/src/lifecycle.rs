// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, shutdown, config (re)loading.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use fs2::FileExt;
use pw_notify::{DesktopChannel, HttpPushChannel, HttpPushConfig, NotificationPipeline};
use pw_plugins::PluginRegistry;
use pw_scheduler::Scheduler;
use pw_store::StatusStore;
use pw_tracker::StateTracker;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{DaemonConfig, DaemonDocument};

/// Static daemon configuration: where everything lives on disk.
#[derive(Debug, Clone)]
pub struct Config {
    pub state_dir: PathBuf,
    pub config_path: PathBuf,
    pub lock_path: PathBuf,
    pub version_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, LifecycleError> {
        let state_dir = crate::env::state_dir()?;
        let config_path = crate::env::config_path(&state_dir);
        Ok(Self {
            lock_path: state_dir.join("daemon.pid"),
            version_path: state_dir.join("daemon.version"),
            log_path: state_dir.join("daemon.log"),
            config_path,
            state_dir,
        })
    }
}

/// Everything the running daemon needs, assembled once at startup.
pub struct DaemonState {
    pub config: Config,
    #[allow(dead_code)]
    lock_file: File,
    pub store: Arc<StatusStore>,
    pub tracker: Arc<StateTracker>,
    pub registry: Arc<PluginRegistry>,
    pub pipeline: Arc<NotificationPipeline>,
    pub daemon_config: DaemonConfig,
    pub start_time: Instant,
}

impl DaemonState {
    /// Reconcile the store with the inventory this process started with.
    /// Config reload (picking up edits without a restart) re-parses and
    /// calls this again with the freshly lowered inventory.
    pub fn reconcile(&self) {
        pw_inventory::reconcile(&self.store, &self.daemon_config.hosts, &self.daemon_config.checks);
    }

    pub fn start_scheduler(&self) -> Scheduler {
        Scheduler::start(
            self.daemon_config.scheduler.clone(),
            Arc::clone(&self.registry),
            Arc::clone(&self.store),
            Arc::clone(&self.tracker),
            Arc::new(pw_scheduler::NoopMetricsSink),
            Arc::clone(&self.pipeline),
            self.daemon_config.scheduler.soft_fail_enabled,
        )
    }

    /// Flush durable state and release lock/version files.
    pub fn shutdown(&self) -> Result<(), LifecycleError> {
        info!("shutting down daemon");
        if self.config.version_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.version_path) {
                warn!(error = %e, "failed to remove version file");
            }
        }
        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!(error = %e, "failed to remove lock file");
            }
        }
        info!("daemon shutdown complete");
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("could not determine state directory")]
    NoStateDir,
    #[error("failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] pw_inventory::ConfigError),
    #[error("store error: {0}")]
    Store(#[from] pw_store::StoreError),
}

/// Builds the channel list. A failing channel is logged and dropped rather
/// than aborting startup (§7 `ChannelPermanent: log + drop`); the desktop
/// channel always succeeds and is always present.
fn build_channels(notify: &pw_notify::NotifyConfig) -> Vec<Arc<dyn pw_notify::Channel>> {
    let mut channels: Vec<Arc<dyn pw_notify::Channel>> = vec![Arc::new(DesktopChannel::new())];
    if notify.enabled && !notify.url.as_deref().unwrap_or_default().is_empty() {
        let push_config = HttpPushConfig {
            url: notify.url.clone().unwrap_or_default(),
            user_key: notify.user_key.clone(),
            api_token: notify.api_token.clone(),
            device: notify.device.clone(),
            ..HttpPushConfig::default()
        };
        match HttpPushChannel::new(push_config) {
            Ok(channel) => channels.push(Arc::new(channel)),
            Err(e) => warn!(error = %e, "failed to construct push notification channel, continuing without it"),
        }
    }
    channels
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

/// Start the daemon: acquire the lock, load and validate configuration,
/// open the status store (replaying its WAL/snapshot), and reconcile the
/// inventory before returning control to `main`.
pub fn startup(config: Config) -> Result<DaemonState, LifecycleError> {
    std::fs::create_dir_all(&config.state_dir)?;

    let lock_file = std::fs::OpenOptions::new().write(true).create(true).truncate(false).open(&config.lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;
    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    std::fs::write(&config.version_path, crate::env::VERSION)?;

    let toml_source = std::fs::read_to_string(&config.config_path).unwrap_or_default();
    let document = DaemonDocument::parse(&toml_source)?;
    let daemon_config = document.into_config(now_epoch_ms())?;

    let store = Arc::new(StatusStore::open(&config.state_dir)?);
    let tracker = Arc::new(StateTracker::new());
    let registry = Arc::new(PluginRegistry::with_builtins());
    let channels = build_channels(&daemon_config.notify);
    let pipeline = Arc::new(NotificationPipeline::new(daemon_config.notify.clone(), channels));

    info!(
        hosts = daemon_config.hosts.len(),
        checks = daemon_config.checks.len(),
        workers = daemon_config.scheduler.workers,
        "daemon configuration loaded"
    );

    let state = DaemonState { config, lock_file, store, tracker, registry, pipeline, daemon_config, start_time: Instant::now() };
    state.reconcile();

    info!("daemon started");
    Ok(state)
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
