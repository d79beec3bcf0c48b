// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pulsewatch status` — current check results and history.

use anyhow::Result;
use clap::{Args, Subcommand};
use pw_core::ExitCode;
use pw_store::{StatusFilter, StatusStore};
use std::io::Write;

use crate::output::{format_time_ago, handle_list, OutputFormat};

#[derive(Args)]
pub struct StatusArgs {
    #[command(subcommand)]
    pub command: StatusCommand,
}

#[derive(Subcommand)]
pub enum StatusCommand {
    /// Show current status for all or a filtered subset of checks
    Show {
        /// Limit to a single host
        #[arg(long)]
        host: Option<String>,
        /// Limit to a single check
        #[arg(long)]
        check: Option<String>,
        /// Limit to one exit state: ok, warning, critical, or unknown
        #[arg(long, value_parser = parse_exit_code)]
        exit_code: Option<ExitCode>,
        /// Cap the number of rows returned (newest first)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Show status history for one host/check pair
    History {
        host: String,
        check: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

fn parse_exit_code(s: &str) -> Result<ExitCode, String> {
    match s.to_ascii_lowercase().as_str() {
        "ok" => Ok(ExitCode::Ok),
        "warning" => Ok(ExitCode::Warning),
        "critical" => Ok(ExitCode::Critical),
        "unknown" => Ok(ExitCode::Unknown),
        other => Err(format!("'{other}' is not one of: ok, warning, critical, unknown")),
    }
}

pub fn run(store: &StatusStore, command: StatusCommand) -> Result<()> {
    match command {
        StatusCommand::Show { host, check, exit_code, limit, output } => show(store, host, check, exit_code, limit, output),
        StatusCommand::History { host, check, output } => history(store, host, check, output),
    }
}

fn show(
    store: &StatusStore,
    host: Option<String>,
    check: Option<String>,
    exit_code: Option<ExitCode>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let filter = StatusFilter { host_id: host.map(pw_core::HostId::new), check_id: check.map(pw_core::CheckId::new), exit_code, limit };
    let mut statuses = store.get_statuses(&filter);
    statuses.sort_by(|a, b| (a.host_id.as_str(), a.check_id.as_str()).cmp(&(b.host_id.as_str(), b.check_id.as_str())));
    handle_list(format, &statuses, "No status recorded yet", |statuses, out| {
        let _ = writeln!(out, "{:<20} {:<20} {:<10} {:<8} {}", "HOST", "CHECK", "STATE", "AGE", "OUTPUT");
        for status in statuses {
            let _ = writeln!(
                out,
                "{:<20} {:<20} {:<10} {:<8} {}",
                status.host_id.as_str(),
                status.check_id.as_str(),
                status.exit_code,
                format_time_ago(status.timestamp_ms),
                first_line(&status.output)
            );
        }
    })
}

fn history(store: &StatusStore, host: String, check: String, format: OutputFormat) -> Result<()> {
    let host_id = pw_core::HostId::new(host);
    let check_id = pw_core::CheckId::new(check);
    let history = store.get_status_history(&host_id, &check_id);
    handle_list(format, &history, "No history recorded for this pair", |entries, out| {
        let _ = writeln!(out, "{:<8} {:<10} {}", "AGE", "STATE", "OUTPUT");
        for entry in entries {
            let _ = writeln!(out, "{:<8} {:<10} {}", format_time_ago(entry.timestamp_ms), entry.exit_code, first_line(&entry.output));
        }
    })
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}
