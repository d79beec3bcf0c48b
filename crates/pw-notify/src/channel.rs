// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The push-transport contract every notification backend implements.

use crate::error::ChannelError;
use crate::event::NotificationEvent;
use async_trait::async_trait;

/// Priority scale matching the reference push-notification API: emergency
/// (2) bypasses quiet hours, the rest do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(pub i8);

impl Priority {
    pub const LOWEST: Priority = Priority(-2);
    pub const LOW: Priority = Priority(-1);
    pub const NORMAL: Priority = Priority(0);
    pub const HIGH: Priority = Priority(1);
    pub const EMERGENCY: Priority = Priority(2);

    pub fn is_emergency(self) -> bool {
        self.0 >= Self::EMERGENCY.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// A fully resolved message ready to hand to a channel: the event plus
/// whatever overrides decided about title/priority/sound/recipient.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub event: NotificationEvent,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub sound: Option<String>,
    pub recipient: Option<String>,
}

/// One external push transport. The pipeline supports any number of these;
/// each carries its own retry loop.
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, dispatch: &Dispatch) -> Result<(), ChannelError>;

    /// Used by the CLI's `notify test` command: a bare connectivity check,
    /// bypassing overrides/throttling/quiet-hours.
    async fn test(&self, message: &str) -> Result<(), ChannelError>;
}
