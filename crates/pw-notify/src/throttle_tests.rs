// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn host(name: &str) -> HostId {
    HostId::new(name)
}

#[test]
fn disabled_config_always_admits() {
    let throttle = Throttle::new();
    let config = ThrottleConfig { enabled: false, window_minutes: 1, max_per_host: 1, max_total: 1 };
    for _ in 0..10 {
        assert!(throttle.admit(&config, &host("h1"), 0));
    }
}

#[test]
fn per_host_cap_blocks_after_limit() {
    let throttle = Throttle::new();
    let config = ThrottleConfig { enabled: true, window_minutes: 10, max_per_host: 2, max_total: 0 };
    assert!(throttle.admit(&config, &host("h1"), 0));
    assert!(throttle.admit(&config, &host("h1"), 1_000));
    assert!(!throttle.admit(&config, &host("h1"), 2_000));
    // A different host has its own budget.
    assert!(throttle.admit(&config, &host("h2"), 2_000));
}

#[test]
fn total_cap_blocks_across_hosts() {
    let throttle = Throttle::new();
    let config = ThrottleConfig { enabled: true, window_minutes: 10, max_per_host: 0, max_total: 2 };
    assert!(throttle.admit(&config, &host("h1"), 0));
    assert!(throttle.admit(&config, &host("h2"), 0));
    assert!(!throttle.admit(&config, &host("h3"), 0));
}

#[test]
fn window_expiry_admits_again() {
    let throttle = Throttle::new();
    let config = ThrottleConfig { enabled: true, window_minutes: 1, max_per_host: 1, max_total: 0 };
    assert!(throttle.admit(&config, &host("h1"), 0));
    assert!(!throttle.admit(&config, &host("h1"), 30_000));
    assert!(throttle.admit(&config, &host("h1"), 60_001));
}

#[test]
fn zero_cap_means_unbounded_for_that_dimension() {
    let throttle = Throttle::new();
    let config = ThrottleConfig { enabled: true, window_minutes: 10, max_per_host: 0, max_total: 0 };
    for i in 0..50 {
        assert!(throttle.admit(&config, &host("h1"), i));
    }
}
