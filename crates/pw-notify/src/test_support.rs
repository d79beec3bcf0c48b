// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for this crate's own tests and for downstream crates
//! (scheduler, daemon) exercising the notification pipeline.

use crate::channel::{Dispatch, Priority};
use crate::event::NotificationEvent;
use pw_core::{Check, ExitCode, Host, HostId, Status};

pub fn sample_host() -> Host {
    Host::builder().name("web1").id(HostId::new("host-web1")).build()
}

pub fn sample_check(threshold: u32) -> Check {
    Check::builder().name("ping").hosts(vec![HostId::new("host-web1")]).threshold(threshold).build()
}

pub fn sample_event(previous: ExitCode, current: ExitCode) -> NotificationEvent {
    let host = sample_host();
    let check = sample_check(3);
    let status = Status::builder()
        .host_id(host.id.clone())
        .check_id(check.id.clone())
        .exit_code(current)
        .timestamp_ms(1_000)
        .build();
    NotificationEvent {
        host,
        check,
        status,
        previous_exit: previous,
        timestamp_ms: 1_000,
        is_recovery: crate::event::is_recovery(previous, current),
    }
}

pub fn sample_dispatch() -> Dispatch {
    let event = sample_event(ExitCode::Ok, ExitCode::Critical);
    Dispatch {
        title: format!("{} is {}", event.host.label(), event.status.exit_code),
        message: event.status.output.clone(),
        priority: Priority::NORMAL,
        sound: None,
        recipient: None,
        event,
    }
}
