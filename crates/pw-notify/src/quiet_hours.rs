// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock suppression window, possibly spanning midnight.

use crate::channel::Priority;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuietHours {
    #[serde(default)]
    pub enabled: bool,
    /// Hour of day, 0-23, inclusive start of the quiet window.
    pub start_hour: u8,
    /// Hour of day, 0-23, exclusive end of the quiet window.
    pub end_hour: u8,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for QuietHours {
    fn default() -> Self {
        Self { enabled: false, start_hour: 0, end_hour: 0, timezone: default_timezone() }
    }
}

impl QuietHours {
    /// Whether `priority` should be suppressed right now. Emergency priority
    /// always bypasses quiet hours.
    pub fn suppresses(&self, now: DateTime<Utc>, priority: Priority) -> bool {
        if !self.enabled || priority.is_emergency() {
            return false;
        }
        self.is_quiet_at(now)
    }

    fn is_quiet_at(&self, now: DateTime<Utc>) -> bool {
        let hour = match self.timezone.parse::<Tz>() {
            Ok(tz) => now.with_timezone(&tz).hour() as u8,
            Err(_) => now.hour() as u8,
        };
        if self.start_hour == self.end_hour {
            // Degenerate window (e.g. both 0): treat as "always quiet" only
            // when explicitly configured that way, never accidental.
            return self.start_hour != 0 || self.end_hour != 0;
        }
        if self.start_hour < self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            // Spans midnight: e.g. start=22, end=6 covers [22,24) U [0,6).
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

#[cfg(test)]
#[path = "quiet_hours_tests.rs"]
mod tests;
