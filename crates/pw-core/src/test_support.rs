// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Check, CheckId, ExitCode, Host, HostId};

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::ExitCode;
    use proptest::prelude::*;

    pub fn arb_exit_code() -> impl Strategy<Value = ExitCode> {
        prop_oneof![
            Just(ExitCode::Ok),
            Just(ExitCode::Warning),
            Just(ExitCode::Critical),
            Just(ExitCode::Unknown),
        ]
    }

    /// A short sequence of observations, useful for state-machine invariants.
    pub fn arb_exit_code_sequence(max_len: usize) -> impl Strategy<Value = Vec<ExitCode>> {
        prop::collection::vec(arb_exit_code(), 0..max_len)
    }
}

/// A minimal enabled host for tests, with a predictable id derived from `name`.
pub fn test_host(name: &str) -> Host {
    Host::builder().name(name).id(HostId::new(format!("host-{name}"))).build()
}

/// A minimal enabled check for tests, targeting `hosts` with `threshold`.
pub fn test_check(name: &str, hosts: Vec<HostId>, threshold: u32) -> Check {
    Check::builder()
        .name(name)
        .id(CheckId::new(format!("check-{name}")))
        .hosts(hosts)
        .threshold(threshold)
        .build()
}

/// Run `sequence` through a plain threshold state machine by hand, mirroring
/// the tracker's rules, for use in tests that assert against a second
/// independent computation rather than re-deriving the tracker's own output.
pub fn naive_reported_sequence(sequence: &[ExitCode], threshold: u32) -> Vec<ExitCode> {
    let mut current = ExitCode::Unknown;
    let mut pending = ExitCode::Unknown;
    let mut count: u32 = 1;
    let mut out = Vec::with_capacity(sequence.len());
    for &observed in sequence {
        if observed == pending {
            count += 1;
        } else {
            pending = observed;
            count = 1;
        }
        let should_promote = observed == ExitCode::Ok || count >= threshold.max(1);
        if should_promote {
            current = observed;
            count = 1;
        }
        out.push(current);
    }
    out
}
