// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pulsewatch checks` — inspect configured checks.

use anyhow::Result;
use clap::{Args, Subcommand};
use pw_store::StatusStore;
use std::io::Write;

use crate::output::{handle_list, OutputFormat};

#[derive(Args)]
pub struct ChecksArgs {
    #[command(subcommand)]
    pub command: ChecksCommand,
}

#[derive(Subcommand)]
pub enum ChecksCommand {
    /// List all configured checks
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

pub fn run(store: &StatusStore, command: ChecksCommand) -> Result<()> {
    match command {
        ChecksCommand::List { output } => list(store, output),
    }
}

fn list(store: &StatusStore, format: OutputFormat) -> Result<()> {
    let mut checks = store.get_checks();
    checks.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    handle_list(format, &checks, "No checks configured", |checks, out| {
        let _ = writeln!(out, "{:<24} {:<12} {:<10} {:<10} {}", "ID", "TYPE", "ENABLED", "THRESHOLD", "HOSTS");
        for check in checks {
            let _ = writeln!(
                out,
                "{:<24} {:<12} {:<10} {:<10} {}",
                check.id.as_str(),
                check.kind,
                check.enabled,
                check.threshold,
                check.hosts.len()
            );
        }
    })
}
