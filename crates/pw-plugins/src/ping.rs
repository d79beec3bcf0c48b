// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ICMP-style reachability check. Shells out to the system `ping` binary
//! rather than opening a raw socket, which would require elevated
//! privilege this daemon does not run with.

use crate::exec::{run_with_deadline, RunOutcome};
use crate::{Plugin, PluginError};
use async_trait::async_trait;
use pw_core::{CheckResult, ExitCode, Host};
use std::collections::HashMap;
use std::time::Instant;
use tokio::process::Command;

const DEFAULT_COUNT: &str = "3";

pub struct PingPlugin;

impl PingPlugin {
    fn target<'a>(&self, host: &'a Host) -> Option<&'a str> {
        host.ipv4.as_deref().or(host.hostname.as_deref())
    }

    fn count(options: &HashMap<String, String>) -> &str {
        options.get("count").map(String::as_str).unwrap_or(DEFAULT_COUNT)
    }
}

#[async_trait]
impl Plugin for PingPlugin {
    fn name(&self) -> &str {
        "ping"
    }

    fn init(&self, options: &HashMap<String, String>) -> Result<(), PluginError> {
        if let Some(count) = options.get("count") {
            count.parse::<u32>().map_err(|_| {
                PluginError::InitFailed(format!("ping count '{count}' is not a valid integer"))
            })?;
        }
        Ok(())
    }

    async fn execute(
        &self,
        options: &HashMap<String, String>,
        host: &Host,
        deadline: Instant,
    ) -> CheckResult {
        let start = Instant::now();
        let Some(target) = self.target(host) else {
            return CheckResult::unknown(format!(
                "host '{}' has no ipv4 or hostname configured for ping",
                host.label()
            ));
        };

        let mut command = Command::new("ping");
        command.args(["-c", Self::count(options), "-W", "2", target]);

        match run_with_deadline(command, deadline).await {
            RunOutcome::Completed(output) => {
                let duration = start.elapsed();
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                if output.status.success() {
                    CheckResult {
                        exit_code: ExitCode::Ok,
                        output: format!("PING OK - {target} is reachable"),
                        perf_data: extract_rtt_perf_data(&stdout),
                        long_output: stdout,
                        duration,
                    }
                } else {
                    CheckResult {
                        exit_code: ExitCode::Critical,
                        output: format!("PING CRITICAL - {target} is unreachable"),
                        perf_data: String::new(),
                        long_output: stdout,
                        duration,
                    }
                }
            }
            RunOutcome::TimedOut => CheckResult::unknown(format!(
                "Check execution failed: ping to {target} exceeded the deadline"
            )),
            RunOutcome::SpawnFailed(err) => {
                CheckResult::unknown(format!("Check execution failed: {err}"))
            }
        }
    }
}

/// Pull the `rtt min/avg/max/mdev` line out of ping's stdout and format it as
/// Nagios-style perf data, if present.
fn extract_rtt_perf_data(stdout: &str) -> String {
    stdout
        .lines()
        .find(|line| line.contains("min/avg/max"))
        .and_then(|line| line.split('=').nth(1))
        .map(|values| format!("rtt={}", values.trim()))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "ping_tests.rs"]
mod tests;
