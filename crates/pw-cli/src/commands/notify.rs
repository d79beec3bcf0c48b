// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pulsewatch notify test` — send a bare connectivity probe through a
//! channel, bypassing overrides/throttling/quiet-hours.

use anyhow::Result;
use clap::{Args, Subcommand};
use pw_notify::{Channel, DesktopChannel, HttpPushChannel, HttpPushConfig, NotifyConfig};

#[derive(Args)]
pub struct NotifyArgs {
    #[command(subcommand)]
    pub command: NotifyCommand,
}

#[derive(Subcommand)]
pub enum NotifyCommand {
    /// Send a test notification through the desktop channel or a configured push provider
    Test {
        /// Send through the HTTP push channel instead of the desktop channel
        #[arg(long)]
        push: bool,
        /// Message body
        #[arg(long, default_value = "pulsewatch test notification")]
        message: String,
    },
}

pub async fn run(command: NotifyCommand) -> Result<()> {
    match command {
        NotifyCommand::Test { push, message } => test(push, &message).await,
    }
}

async fn test(push: bool, message: &str) -> Result<()> {
    if push {
        let notify = NotifyConfig::default();
        let config = HttpPushConfig {
            url: notify.url.clone().unwrap_or_default(),
            user_key: notify.user_key.clone(),
            api_token: notify.api_token.clone(),
            device: notify.device.clone(),
            ..HttpPushConfig::default()
        };
        anyhow::ensure!(!config.url.is_empty(), "no push provider URL configured");
        let channel = HttpPushChannel::new(config)?;
        channel.test(message).await?;
        println!("sent test notification via {}", channel.name());
    } else {
        let channel = DesktopChannel::new();
        channel.test(message).await?;
        println!("sent test notification via {}", channel.name());
    }
    Ok(())
}
