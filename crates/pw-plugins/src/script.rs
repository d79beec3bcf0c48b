// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Nagios-style external script runner. Spawns `options["command"]` with
//! `options["args"]` (shell-split), maps the exit status directly onto
//! [`ExitCode`], and parses a `|`-delimited perf-data suffix from stdout.

use crate::exec::{run_with_deadline, RunOutcome};
use crate::{Plugin, PluginError};
use async_trait::async_trait;
use pw_core::{CheckResult, ExitCode, Host};
use std::collections::HashMap;
use std::time::Instant;
use tokio::process::Command;

pub struct ScriptPlugin;

impl ScriptPlugin {
    /// Split `args` on whitespace, respecting single/double-quoted spans —
    /// enough for Nagios plugin invocations, not a general shell grammar.
    fn split_args(args: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = String::new();
        let mut quote: Option<char> = None;
        for ch in args.chars() {
            match quote {
                Some(q) if ch == q => quote = None,
                Some(_) => current.push(ch),
                None if ch == '\'' || ch == '"' => quote = Some(ch),
                None if ch.is_whitespace() => {
                    if !current.is_empty() {
                        out.push(std::mem::take(&mut current));
                    }
                }
                None => current.push(ch),
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
        out
    }
}

#[async_trait]
impl Plugin for ScriptPlugin {
    fn name(&self) -> &str {
        "script"
    }

    fn init(&self, options: &HashMap<String, String>) -> Result<(), PluginError> {
        if !options.contains_key("command") {
            return Err(PluginError::MissingOption("command".to_string()));
        }
        Ok(())
    }

    async fn execute(
        &self,
        options: &HashMap<String, String>,
        _host: &Host,
        deadline: Instant,
    ) -> CheckResult {
        let start = Instant::now();
        let Some(command_path) = options.get("command") else {
            return CheckResult::unknown("script check has no 'command' option configured");
        };

        let mut command = Command::new(command_path);
        if let Some(args) = options.get("args") {
            command.args(Self::split_args(args));
        }

        match run_with_deadline(command, deadline).await {
            RunOutcome::Completed(output) => {
                let duration = start.elapsed();
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let exit_code = output.status.code().map(map_exit_status).unwrap_or(ExitCode::Unknown);
                let (output_text, perf_data) = split_perf_data(&stdout);
                CheckResult { exit_code, output: output_text, perf_data, long_output: stdout, duration }
            }
            RunOutcome::TimedOut => CheckResult::unknown(format!(
                "Check execution failed: {command_path} exceeded the deadline"
            )),
            RunOutcome::SpawnFailed(err) => {
                CheckResult::unknown(format!("Check execution failed: {err}"))
            }
        }
    }
}

/// Nagios exit-status convention: 0 OK, 1 WARNING, 2 CRITICAL, anything
/// else UNKNOWN.
fn map_exit_status(code: i32) -> ExitCode {
    match code {
        0 => ExitCode::Ok,
        1 => ExitCode::Warning,
        2 => ExitCode::Critical,
        _ => ExitCode::Unknown,
    }
}

/// Split plugin stdout into `(output, perf_data)` on the first `|`. Only
/// the first line is used as `output`; perf data is taken verbatim after
/// the pipe.
fn split_perf_data(stdout: &str) -> (String, String) {
    let first_line = stdout.lines().next().unwrap_or("");
    match first_line.split_once('|') {
        Some((output, perf)) => (output.trim().to_string(), perf.trim().to_string()),
        None => (first_line.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
