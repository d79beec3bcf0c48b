// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ties trigger detection, override resolution, quiet hours, throttling,
//! realert scheduling, and channel fan-out into the single entry point the
//! scheduler's result-handler calls on every reported-state transition.

use crate::channel::{Channel, Dispatch, Priority};
use crate::config::NotifyConfig;
use crate::error::ChannelError;
use crate::event::{should_notify, NotificationEvent};
use crate::overrides::{self, ResolvedRouting};
use crate::realert::RealertLedger;
use crate::throttle::Throttle;
use chrono::{TimeZone, Utc};
use parking_lot::RwLock;
use pw_core::{Check, ExitCode, Host, Status};
use std::sync::Arc;
use std::time::Duration;

/// What the pipeline did with a transition, for logging/metrics/tests.
#[derive(Debug, PartialEq)]
pub enum PipelineOutcome {
    NotNotifyWorthy,
    SuppressedByQuietHours,
    Throttled,
    RecoverySendDisabled,
    Dispatched { sent: usize, failed: usize },
}

pub struct NotificationPipeline {
    config: RwLock<NotifyConfig>,
    channels: Vec<Arc<dyn Channel>>,
    realert: RealertLedger,
    throttle: Throttle,
}

impl NotificationPipeline {
    pub fn new(config: NotifyConfig, channels: Vec<Arc<dyn Channel>>) -> Self {
        Self { config: RwLock::new(config), channels, realert: RealertLedger::new(), throttle: Throttle::new() }
    }

    pub fn set_config(&self, config: NotifyConfig) {
        *self.config.write() = config;
    }

    fn resolve_routing(&self, event: &NotificationEvent) -> ResolvedRouting {
        let config = self.config.read();
        let base = ResolvedRouting {
            priority: Priority(config.priority),
            sound: config.sound.clone(),
            recipient: config.device.clone(),
            quiet_hours: config.quiet_hours.clone(),
            realert_interval: Duration::from_secs(config.realert_interval_secs),
            max_realerts: config.max_realerts,
            send_recovery: config.send_recovery,
            title_template: config.title.clone(),
            message_template: "{output}".to_string(),
        };
        overrides::resolve(base, &config.overrides, event)
    }

    fn render(template: &str, event: &NotificationEvent) -> String {
        template
            .replace("{host}", event.host.label())
            .replace("{check}", &event.check.name)
            .replace("{state}", &event.status.exit_code.to_string())
            .replace("{output}", &event.status.output)
    }

    fn build_dispatch(&self, event: NotificationEvent, routing: &ResolvedRouting) -> Dispatch {
        Dispatch {
            title: Self::render(&routing.title_template, &event),
            message: Self::render(&routing.message_template, &event),
            priority: routing.priority,
            sound: routing.sound.clone(),
            recipient: routing.recipient.clone(),
            event,
        }
    }

    /// Process a single state transition reported by the state tracker.
    /// `now_ms` is wall-clock epoch milliseconds.
    pub async fn handle_transition(&self, event: NotificationEvent, now_ms: u64) -> PipelineOutcome {
        if !should_notify(event.previous_exit, event.current_exit()) {
            return PipelineOutcome::NotNotifyWorthy;
        }

        let routing = self.resolve_routing(&event);
        let host_id = event.host.id.clone();
        let check_id = event.check.id.clone();

        if event.is_recovery {
            self.realert.clear(&host_id, &check_id);
            if !routing.send_recovery {
                return PipelineOutcome::RecoverySendDisabled;
            }
        } else {
            // A fresh degradation or lateral change resets any prior schedule.
            self.realert.clear(&host_id, &check_id);
        }

        if !self.throttle.admit(&self.config.read().throttle, &host_id, now_ms) {
            return PipelineOutcome::Throttled;
        }

        let now = epoch_ms_to_utc(now_ms);
        if routing.quiet_hours.suppresses(now, routing.priority) {
            if !event.is_recovery {
                self.realert.record_initial_send(host_id, check_id, event.current_exit(), now_ms);
            }
            return PipelineOutcome::SuppressedByQuietHours;
        }

        let current_exit = event.current_exit();
        let is_recovery = event.is_recovery;
        let dispatch = self.build_dispatch(event, &routing);
        let (sent, failed) = self.dispatch_all(&dispatch).await;

        if !is_recovery {
            self.realert.record_initial_send(host_id, check_id, current_exit, now_ms);
        }

        PipelineOutcome::Dispatched { sent, failed }
    }

    /// Periodic realert sweep: the scheduler/daemon supplies currently
    /// non-OK pairs; this checks cadence/cap and dispatches those due.
    pub async fn poll_realert(&self, host: &Host, check: &Check, status: &Status, now_ms: u64) -> PipelineOutcome {
        if status.exit_code == ExitCode::Ok {
            return PipelineOutcome::NotNotifyWorthy;
        }
        let synthetic = NotificationEvent {
            host: host.clone(),
            check: check.clone(),
            status: status.clone(),
            previous_exit: status.exit_code,
            timestamp_ms: now_ms,
            is_recovery: false,
        };
        let routing = self.resolve_routing(&synthetic);
        if !self.realert.due(
            &host.id,
            &check.id,
            status.exit_code,
            routing.realert_interval,
            routing.max_realerts,
            now_ms,
        ) {
            return PipelineOutcome::NotNotifyWorthy;
        }
        let now = epoch_ms_to_utc(now_ms);
        if routing.quiet_hours.suppresses(now, routing.priority) {
            return PipelineOutcome::SuppressedByQuietHours;
        }
        let dispatch = self.build_dispatch(synthetic, &routing);
        let (sent, failed) = self.dispatch_all(&dispatch).await;
        PipelineOutcome::Dispatched { sent, failed }
    }

    async fn dispatch_all(&self, dispatch: &Dispatch) -> (usize, usize) {
        let mut sent = 0;
        let mut failed = 0;
        for channel in &self.channels {
            match channel.send(dispatch).await {
                Ok(()) => sent += 1,
                Err(err) => {
                    failed += 1;
                    tracing::warn!(channel = channel.name(), error = %err, "notification channel send failed");
                }
            }
        }
        (sent, failed)
    }

    pub async fn test_channels(&self, message: &str) -> Vec<(String, Result<(), ChannelError>)> {
        let mut results = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            results.push((channel.name().to_string(), channel.test(message).await));
        }
        results
    }
}

fn epoch_ms_to_utc(now_ms: u64) -> chrono::DateTime<Utc> {
    Utc.timestamp_millis_opt(now_ms as i64).single().unwrap_or_else(Utc::now)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
