// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pulsewatch operator CLI: local inspection of the running daemon's
//! inventory and status store, and ad-hoc notification channel testing.
//! Talks to the Status Store directly — there is no networked API.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod env;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pw_store::StatusStore;

use commands::{checks, hosts, notify, status};

#[derive(Parser)]
#[command(name = "pulsewatch", version, about = "Inspect the Pulsewatch daemon's inventory and status", styles = color::styles())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect monitored hosts
    Hosts(hosts::HostsArgs),
    /// Inspect configured checks
    Checks(checks::ChecksArgs),
    /// Inspect current and historical check status
    Status(status::StatusArgs),
    /// Send test notifications through a channel
    Notify(notify::NotifyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `notify test` doesn't need the store, so it skips opening it.
    let notify_args = match cli.command {
        Command::Notify(args) => args,
        other => return run_with_store(other),
    };
    notify::run(notify_args.command).await
}

fn run_with_store(command: Command) -> Result<()> {
    let state_dir = crate::env::state_dir()?;
    let store = StatusStore::open(&state_dir)?;
    match command {
        Command::Hosts(args) => hosts::run(&store, args.command),
        Command::Checks(args) => checks::run(&store, args.command),
        Command::Status(args) => status::run(&store, args.command),
        Command::Notify(_) => unreachable!("handled by caller"),
    }
}
