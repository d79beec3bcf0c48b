// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing and validation of the declarative `[[hosts]]` / `[[checks]]`
//! sections of the daemon's TOML configuration document (§6).
//!
//! Loading is two-phase: `toml::from_str` into the raw wire shape (string
//! durations, no cross-referential checks), then [`Document::into_entities`]
//! validates and lowers into the `pw-core` domain types `reconcile` wants.

use crate::ConfigError;
use pw_core::{Check, CheckId, Host, HostId, IntervalMap};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    hosts: Vec<RawHost>,
    #[serde(default)]
    checks: Vec<RawCheck>,
}

#[derive(Debug, Deserialize)]
struct RawHost {
    id: String,
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    ipv4: Option<String>,
    #[serde(default)]
    hostname: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawCheck {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    hosts: Vec<String>,
    #[serde(default)]
    interval: RawIntervalMap,
    #[serde(default = "default_threshold")]
    threshold: u32,
    timeout: String,
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default)]
    options: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawIntervalMap {
    #[serde(default)]
    ok: Option<String>,
    #[serde(default)]
    warning: Option<String>,
    #[serde(default)]
    critical: Option<String>,
    #[serde(default)]
    unknown: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> u32 {
    1
}

fn parse_duration(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw).map_err(|e| ConfigError::Invalid { key: key.to_string(), message: e.to_string() })
}

impl Document {
    pub fn parse(toml_source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_source)?)
    }

    /// Validate referential integrity and duration/threshold formatting,
    /// lowering into the domain types `reconcile` consumes. Timestamps are
    /// not part of the wire format; callers stamp `created_at_ms` /
    /// `updated_at_ms` themselves (existing entities keep their originals
    /// via `reconcile`'s field-by-field update).
    pub fn into_entities(self, now_ms: u64) -> Result<(Vec<Host>, Vec<Check>), ConfigError> {
        let mut host_ids = std::collections::HashSet::new();
        let mut hosts = Vec::with_capacity(self.hosts.len());
        for raw in self.hosts {
            if !host_ids.insert(raw.id.clone()) {
                return Err(ConfigError::Invalid { key: "hosts.id".to_string(), message: format!("duplicate host id '{}'", raw.id) });
            }
            hosts.push(Host {
                id: HostId::new(raw.id),
                name: raw.name,
                display_name: raw.display_name,
                ipv4: raw.ipv4,
                hostname: raw.hostname,
                group: raw.group,
                enabled: raw.enabled,
                tags: raw.tags,
                created_at_ms: now_ms,
                updated_at_ms: now_ms,
            });
        }

        let mut check_ids = std::collections::HashSet::new();
        let mut checks = Vec::with_capacity(self.checks.len());
        for raw in self.checks {
            if !check_ids.insert(raw.id.clone()) {
                return Err(ConfigError::Invalid { key: "checks.id".to_string(), message: format!("duplicate check id '{}'", raw.id) });
            }
            if raw.threshold == 0 {
                return Err(ConfigError::Invalid { key: format!("checks.{}.threshold", raw.id), message: "threshold must be >= 1".to_string() });
            }
            for host_id in &raw.hosts {
                if !host_ids.contains(host_id) {
                    return Err(ConfigError::Invalid {
                        key: format!("checks.{}.hosts", raw.id),
                        message: format!("references undeclared host '{host_id}'"),
                    });
                }
            }

            let interval = IntervalMap {
                ok: raw.interval.ok.as_deref().map(|d| parse_duration(&format!("checks.{}.interval.ok", raw.id), d)).transpose()?,
                warning: raw
                    .interval
                    .warning
                    .as_deref()
                    .map(|d| parse_duration(&format!("checks.{}.interval.warning", raw.id), d))
                    .transpose()?,
                critical: raw
                    .interval
                    .critical
                    .as_deref()
                    .map(|d| parse_duration(&format!("checks.{}.interval.critical", raw.id), d))
                    .transpose()?,
                unknown: raw
                    .interval
                    .unknown
                    .as_deref()
                    .map(|d| parse_duration(&format!("checks.{}.interval.unknown", raw.id), d))
                    .transpose()?,
            };
            let timeout = parse_duration(&format!("checks.{}.timeout", raw.id), &raw.timeout)?;

            checks.push(Check {
                id: CheckId::new(raw.id),
                name: raw.name,
                kind: raw.kind,
                hosts: raw.hosts.into_iter().map(HostId::new).collect(),
                interval,
                threshold: raw.threshold,
                timeout,
                enabled: raw.enabled,
                options: raw.options,
                created_at_ms: now_ms,
                updated_at_ms: now_ms,
            });
        }

        Ok((hosts, checks))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
