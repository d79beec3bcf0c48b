// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification channel configuration (SPEC_FULL §6 "Notification channel
//! config (reference shape)"), TOML-deserializable alongside the rest of
//! the daemon's configuration surface.

use crate::overrides::Override;
use crate::quiet_hours::QuietHours;
use crate::throttle::ThrottleConfig;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_realert_interval_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub user_key: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub sound: Option<String>,
    #[serde(default = "default_realert_interval_secs")]
    pub realert_interval_secs: u64,
    #[serde(default)]
    pub max_realerts: u32,
    #[serde(default = "default_true")]
    pub send_recovery: bool,
    #[serde(default = "default_title_template")]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_title: Option<String>,
    #[serde(default)]
    pub quiet_hours: QuietHours,
    #[serde(default)]
    pub overrides: Vec<Override>,
    #[serde(default)]
    pub throttle: ThrottleConfig,
}

fn default_title_template() -> String {
    "{host} {check}: {state}".to_string()
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            user_key: String::new(),
            api_token: String::new(),
            device: None,
            priority: 0,
            sound: None,
            realert_interval_secs: default_realert_interval_secs(),
            max_realerts: 0,
            send_recovery: true,
            title: default_title_template(),
            url: None,
            url_title: None,
            quiet_hours: QuietHours::default(),
            overrides: Vec::new(),
            throttle: ThrottleConfig::default(),
        }
    }
}
