// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pulsewatch hosts` — inspect the inventory of monitored hosts.

use anyhow::Result;
use clap::{Args, Subcommand};
use pw_store::StatusStore;
use std::io::Write;

use crate::output::{handle_list, OutputFormat};

#[derive(Args)]
pub struct HostsArgs {
    #[command(subcommand)]
    pub command: HostsCommand,
}

#[derive(Subcommand)]
pub enum HostsCommand {
    /// List all hosts in the inventory
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

pub fn run(store: &StatusStore, command: HostsCommand) -> Result<()> {
    match command {
        HostsCommand::List { output } => list(store, output),
    }
}

fn list(store: &StatusStore, format: OutputFormat) -> Result<()> {
    let mut hosts = store.get_hosts();
    hosts.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    handle_list(format, &hosts, "No hosts configured", |hosts, out| {
        let _ = writeln!(out, "{:<24} {:<24} {:<10} {}", "ID", "NAME", "ENABLED", "GROUP");
        for host in hosts {
            let _ = writeln!(
                out,
                "{:<24} {:<24} {:<10} {}",
                host.id.as_str(),
                host.name,
                host.enabled,
                host.group.as_deref().unwrap_or("-")
            );
        }
    })
}
