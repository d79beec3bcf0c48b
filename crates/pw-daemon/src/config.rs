// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The daemon's top-level TOML document: `[server]`, `[monitoring]`,
//! `[database]`, `[notify]`, plus the `[[hosts]]` / `[[checks]]` inventory
//! that `pw-inventory` parses on its own (§6 Configuration surface).

use pw_inventory::{ConfigError, Document};
use pw_notify::NotifyConfig;
use pw_scheduler::SchedulerConfig;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
pub struct DaemonDocument {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    monitoring: MonitoringSection,
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    notify: NotifyConfig,
    #[serde(flatten)]
    inventory: Document,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    #[serde(default = "default_workers")]
    workers: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { workers: default_workers() }
    }
}

fn default_workers() -> usize {
    3
}

#[derive(Debug, Deserialize)]
struct MonitoringSection {
    #[serde(default = "default_interval_str")]
    default_interval: String,
    #[serde(default = "default_threshold")]
    default_threshold: u32,
    #[serde(default = "default_true")]
    soft_fail_enabled: bool,
}

impl Default for MonitoringSection {
    fn default() -> Self {
        Self { default_interval: default_interval_str(), default_threshold: default_threshold(), soft_fail_enabled: true }
    }
}

fn default_interval_str() -> String {
    "30s".to_string()
}

fn default_threshold() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    #[serde(default = "default_cleanup_interval_str")]
    cleanup_interval: String,
    #[serde(default = "default_history_retention_str")]
    history_retention: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self { cleanup_interval: default_cleanup_interval_str(), history_retention: default_history_retention_str() }
    }
}

fn default_cleanup_interval_str() -> String {
    "6h".to_string()
}

fn default_history_retention_str() -> String {
    "30d".to_string()
}

/// The fully validated, lowered configuration the daemon binary runs with.
pub struct DaemonConfig {
    pub scheduler: SchedulerConfig,
    pub notify: NotifyConfig,
    pub purge_interval: Duration,
    pub history_retention: Duration,
    pub hosts: Vec<pw_core::Host>,
    pub checks: Vec<pw_core::Check>,
}

impl DaemonDocument {
    pub fn parse(toml_source: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_source).map_err(ConfigError::from)
    }

    pub fn into_config(self, now_ms: u64) -> Result<DaemonConfig, ConfigError> {
        let default_interval = parse_duration("monitoring.default_interval", &self.monitoring.default_interval)?;
        let purge_interval = parse_duration("database.cleanup_interval", &self.database.cleanup_interval)?;
        let history_retention = parse_duration("database.history_retention", &self.database.history_retention)?;
        let (hosts, checks) = self.inventory.into_entities(now_ms)?;

        let scheduler = SchedulerConfig {
            workers: self.server.workers.max(1),
            default_interval,
            default_threshold: self.monitoring.default_threshold.max(1),
            soft_fail_enabled: self.monitoring.soft_fail_enabled,
            ..SchedulerConfig::default()
        };

        Ok(DaemonConfig { scheduler, notify: self.notify, purge_interval, history_retention, hosts, checks })
    }
}

fn parse_duration(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw).map_err(|e| ConfigError::Invalid { key: key.to_string(), message: e.to_string() })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
