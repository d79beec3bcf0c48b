// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_is_unknown() {
    assert_eq!(ExitCode::default(), ExitCode::Unknown);
}

#[yare::parameterized(
    ok = { 0, ExitCode::Ok },
    warning = { 1, ExitCode::Warning },
    critical = { 2, ExitCode::Critical },
    unknown = { 3, ExitCode::Unknown },
    negative_collapses_to_unknown = { -1, ExitCode::Unknown },
    out_of_range_collapses_to_unknown = { 42, ExitCode::Unknown },
)]
fn from_status_maps_codes(status: i32, expected: ExitCode) {
    assert_eq!(ExitCode::from_status(status), expected);
}

#[yare::parameterized(
    ok = { ExitCode::Ok, "ok" },
    warning = { ExitCode::Warning, "warning" },
    critical = { ExitCode::Critical, "critical" },
    unknown = { ExitCode::Unknown, "unknown" },
)]
fn display_matches_label(code: ExitCode, label: &str) {
    assert_eq!(code.to_string(), label);
}

#[test]
fn code_round_trips_through_from_status() {
    for code in [ExitCode::Ok, ExitCode::Warning, ExitCode::Critical, ExitCode::Unknown] {
        assert_eq!(ExitCode::from_status(code.code() as i32), code);
    }
}

#[test]
fn is_ok_only_true_for_ok() {
    assert!(ExitCode::Ok.is_ok());
    assert!(!ExitCode::Warning.is_ok());
    assert!(!ExitCode::Critical.is_ok());
    assert!(!ExitCode::Unknown.is_ok());
}

#[test]
fn serde_round_trip() {
    for code in [ExitCode::Ok, ExitCode::Warning, ExitCode::Critical, ExitCode::Unknown] {
        let json = serde_json::to_string(&code).expect("serialize");
        let back: ExitCode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(code, back);
    }
}
