// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered per-event routing overrides (SPEC_FULL §4.5 "Per-event channel
//! resolution"). Later overrides in the list win; each field an override
//! sets replaces the value accumulated so far, fields it leaves unset pass
//! the prior value through.

use crate::channel::Priority;
use crate::event::NotificationEvent;
use crate::quiet_hours::QuietHours;
use pw_core::ExitCode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which events an override applies to. All set fields must match (AND);
/// an unset field matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideMatch {
    #[serde(default)]
    pub host_id: Option<String>,
    #[serde(default)]
    pub check_id: Option<String>,
    #[serde(default)]
    pub host_name_regex: Option<String>,
    #[serde(default)]
    pub check_name_regex: Option<String>,
    #[serde(default)]
    pub severities: Option<Vec<ExitCode>>,
}

impl OverrideMatch {
    fn matches(&self, event: &NotificationEvent) -> bool {
        if let Some(id) = &self.host_id {
            if event.host.id.as_str() != id {
                return false;
            }
        }
        if let Some(id) = &self.check_id {
            if event.check.id.as_str() != id {
                return false;
            }
        }
        if let Some(pattern) = &self.host_name_regex {
            match Regex::new(pattern) {
                Ok(re) if re.is_match(&event.host.name) => {}
                _ => return false,
            }
        }
        if let Some(pattern) = &self.check_name_regex {
            match Regex::new(pattern) {
                Ok(re) if re.is_match(&event.check.name) => {}
                _ => return false,
            }
        }
        if let Some(severities) = &self.severities {
            if !severities.contains(&event.current_exit()) {
                return false;
            }
        }
        true
    }
}

/// Mutations an override applies once it matches. Every field is optional;
/// unset fields leave the accumulated routing value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideAction {
    #[serde(default)]
    pub priority: Option<i8>,
    #[serde(default)]
    pub sound: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub quiet_hours: Option<QuietHours>,
    #[serde(default)]
    pub realert_interval_secs: Option<u64>,
    #[serde(default)]
    pub max_realerts: Option<u32>,
    #[serde(default)]
    pub send_recovery: Option<bool>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message_template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Override {
    #[serde(rename = "match")]
    pub matcher: OverrideMatch,
    pub action: OverrideAction,
}

/// The routing parameters accumulated by applying the global config plus
/// every matching override in order.
#[derive(Debug, Clone)]
pub struct ResolvedRouting {
    pub priority: Priority,
    pub sound: Option<String>,
    pub recipient: Option<String>,
    pub quiet_hours: QuietHours,
    pub realert_interval: Duration,
    pub max_realerts: u32,
    pub send_recovery: bool,
    pub title_template: String,
    pub message_template: String,
}

impl ResolvedRouting {
    pub fn apply(mut self, action: &OverrideAction) -> Self {
        if let Some(p) = action.priority {
            self.priority = Priority(p);
        }
        if let Some(sound) = &action.sound {
            self.sound = Some(sound.clone());
        }
        if let Some(recipient) = &action.recipient {
            self.recipient = Some(recipient.clone());
        }
        if let Some(qh) = &action.quiet_hours {
            self.quiet_hours = qh.clone();
        }
        if let Some(secs) = action.realert_interval_secs {
            self.realert_interval = Duration::from_secs(secs);
        }
        if let Some(max) = action.max_realerts {
            self.max_realerts = max;
        }
        if let Some(send) = action.send_recovery {
            self.send_recovery = send;
        }
        if let Some(title) = &action.title {
            self.title_template = title.clone();
        }
        if let Some(msg) = &action.message_template {
            self.message_template = msg.clone();
        }
        self
    }
}

/// Resolve routing for `event`: start from `base`, then apply every override
/// whose matcher fires, in list order (later wins on overlapping fields).
pub fn resolve(base: ResolvedRouting, overrides: &[Override], event: &NotificationEvent) -> ResolvedRouting {
    overrides.iter().filter(|o| o.matcher.matches(event)).fold(base, |routing, o| routing.apply(&o.action))
}

#[cfg(test)]
#[path = "overrides_tests.rs"]
mod tests;
