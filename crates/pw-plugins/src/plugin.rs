// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The check plugin contract: a uniform capability set any check `type`
//! implements, so the scheduler never needs to know what kind of probe it
//! is running.

use crate::PluginError;
use async_trait::async_trait;
use pw_core::{CheckResult, Host};
use std::collections::HashMap;
use std::time::Instant;

/// One executable check implementation. Plugins MUST honor the deadline
/// passed to [`Plugin::execute`] and MUST NOT report anything worse than
/// `UNKNOWN` for failures they cannot otherwise classify — an unreachable
/// host is a plugin-level `CRITICAL`/`UNKNOWN` result, never an `Err`.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// The `check.type` key this plugin registers under.
    fn name(&self) -> &str;

    /// Validate a check's `options` map once at registry build time.
    fn init(&self, options: &HashMap<String, String>) -> Result<(), PluginError>;

    /// Run one check invocation against `host`, returning no later than
    /// `deadline`. Implementations race their child work against `deadline`
    /// and return a synthetic `UNKNOWN` [`CheckResult`] on expiry rather than
    /// letting the call run over.
    async fn execute(
        &self,
        options: &HashMap<String, String>,
        host: &Host,
        deadline: Instant,
    ) -> CheckResult;
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
