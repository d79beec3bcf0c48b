// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A deterministic fake plugin for tests in this crate and downstream
//! crates (scheduler, tracker integration) that need a plugin without
//! shelling out to a real process.

use crate::{Plugin, PluginError};
use async_trait::async_trait;
use pw_core::{CheckResult, Host};
use std::collections::HashMap;
use std::time::Instant;

pub struct FakePlugin {
    pub result: CheckResult,
}

impl FakePlugin {
    pub fn new(result: CheckResult) -> Self {
        Self { result }
    }
}

#[async_trait]
impl Plugin for FakePlugin {
    fn name(&self) -> &str {
        "fake"
    }

    fn init(&self, _options: &HashMap<String, String>) -> Result<(), PluginError> {
        Ok(())
    }

    async fn execute(&self, _options: &HashMap<String, String>, _host: &Host, _deadline: Instant) -> CheckResult {
        self.result.clone()
    }
}

/// A fake that sleeps for a fixed duration regardless of its deadline,
/// used by callers (the scheduler's worker pool) to exercise their own
/// outer timeout enforcement against a misbehaving plugin.
pub struct SlowFakePlugin {
    pub sleep: std::time::Duration,
}

#[async_trait]
impl Plugin for SlowFakePlugin {
    fn name(&self) -> &str {
        "slow-fake"
    }

    fn init(&self, _options: &HashMap<String, String>) -> Result<(), PluginError> {
        Ok(())
    }

    async fn execute(&self, _options: &HashMap<String, String>, _host: &Host, _deadline: Instant) -> CheckResult {
        tokio::time::sleep(self.sleep).await;
        CheckResult::unknown("slow fake completed without honoring its deadline")
    }
}
