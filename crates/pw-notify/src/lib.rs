// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pw-notify: the notification dispatch pipeline (§4.5) — transition
//! detection, override resolution, quiet hours, throttling, realert
//! scheduling, and retrying channel fan-out — plus the channel
//! implementations it ships with (`DesktopChannel`, `HttpPushChannel`).
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod backoff;
mod channel;
mod config;
mod desktop;
mod error;
mod event;
mod overrides;
mod pipeline;
mod push;
mod quiet_hours;
mod realert;
mod throttle;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use backoff::RetryPolicy;
pub use channel::{Channel, Dispatch, Priority};
pub use config::NotifyConfig;
pub use desktop::DesktopChannel;
#[cfg(any(test, feature = "test-support"))]
pub use desktop::fake::{ChannelCall, FakeChannel};
pub use error::ChannelError;
pub use event::{is_recovery, should_notify, NotificationEvent};
pub use overrides::{Override, OverrideAction, OverrideMatch, ResolvedRouting};
pub use pipeline::{NotificationPipeline, PipelineOutcome};
pub use push::{HttpPushChannel, HttpPushConfig};
pub use quiet_hours::QuietHours;
pub use realert::RealertLedger;
pub use throttle::{Throttle, ThrottleConfig};
