// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 30, hour, 0, 0).unwrap()
}

#[test]
fn disabled_never_suppresses() {
    let qh = QuietHours { enabled: false, start_hour: 22, end_hour: 6, timezone: "UTC".to_string() };
    assert!(!qh.suppresses(at(23), Priority::NORMAL));
}

#[test]
fn simple_window_suppresses_inside_not_outside() {
    let qh = QuietHours { enabled: true, start_hour: 9, end_hour: 17, timezone: "UTC".to_string() };
    assert!(qh.suppresses(at(10), Priority::NORMAL));
    assert!(!qh.suppresses(at(8), Priority::NORMAL));
    assert!(!qh.suppresses(at(17), Priority::NORMAL));
}

#[test]
fn midnight_spanning_window_includes_wrap_around() {
    let qh = QuietHours { enabled: true, start_hour: 22, end_hour: 6, timezone: "UTC".to_string() };
    assert!(qh.suppresses(at(23), Priority::NORMAL));
    assert!(qh.suppresses(at(0), Priority::NORMAL));
    assert!(qh.suppresses(at(5), Priority::NORMAL));
    assert!(!qh.suppresses(at(6), Priority::NORMAL));
    assert!(!qh.suppresses(at(12), Priority::NORMAL));
}

#[test]
fn emergency_priority_bypasses_quiet_hours() {
    let qh = QuietHours { enabled: true, start_hour: 22, end_hour: 6, timezone: "UTC".to_string() };
    assert!(!qh.suppresses(at(23), Priority::EMERGENCY));
}

#[test]
fn unparseable_timezone_falls_back_to_utc() {
    let qh = QuietHours { enabled: true, start_hour: 9, end_hour: 17, timezone: "Not/AZone".to_string() };
    assert!(qh.suppresses(at(10), Priority::NORMAL));
}
