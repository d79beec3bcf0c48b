// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pw_core::test_support::{test_check, test_host};
use pw_core::ExitCode::{Critical, Ok as ExitOk, Warning};
use pw_tracker::StateTracker;
use std::collections::HashMap;

fn state(current: pw_core::ExitCode, pending: pw_core::ExitCode, last_check_time_ms: u64) -> StateInfo {
    let mut s = StateInfo::seed(Some(current), 3, true, last_check_time_ms);
    s.pending_state = pending;
    s
}

#[test]
fn select_interval_falls_back_to_default_when_entry_absent() {
    let check = test_check("c", vec![], 1);
    let s = state(ExitOk, ExitOk, 0);
    assert_eq!(select_interval(&check, &s, Duration::from_secs(45)), Duration::from_secs(45));
}

#[test]
fn select_interval_falls_back_to_default_when_entry_zero() {
    let mut check = test_check("c", vec![], 1);
    check.interval.critical = Some(Duration::ZERO);
    let s = state(Critical, Critical, 0);
    assert_eq!(select_interval(&check, &s, Duration::from_secs(45)), Duration::from_secs(45));
}

#[test]
fn select_interval_uses_the_matching_per_state_entry() {
    let mut check = test_check("c", vec![], 1);
    check.interval.critical = Some(Duration::from_secs(60));
    let s = state(Critical, Critical, 0);
    assert_eq!(select_interval(&check, &s, Duration::from_secs(45)), Duration::from_secs(60));
}

#[test]
fn adaptive_interval_is_unchanged_when_no_change_is_suspected() {
    let s = state(Critical, Critical, 0);
    assert_eq!(adaptive_interval(Duration::from_secs(60), &s), Duration::from_secs(60));
}

#[test]
fn adaptive_interval_is_unchanged_when_soft_fail_is_off() {
    let mut s = state(Critical, Warning, 0);
    s.soft_fail_enabled = false;
    assert_eq!(adaptive_interval(Duration::from_secs(60), &s), Duration::from_secs(60));
}

#[test]
fn adaptive_interval_divides_by_three_when_a_change_is_suspected() {
    let s = state(Critical, Warning, 0);
    assert_eq!(adaptive_interval(Duration::from_secs(90), &s), Duration::from_secs(30));
}

#[test]
fn adaptive_interval_boundary_matches_s4() {
    // S4: interval map {ok:5m, warning:2m, critical:1m, unknown:1m}, default 5m.
    let mut check = test_check("c", vec![], 3);
    check.interval.ok = Some(Duration::from_secs(300));
    check.interval.warning = Some(Duration::from_secs(120));
    check.interval.critical = Some(Duration::from_secs(60));
    check.interval.unknown = Some(Duration::from_secs(60));

    let reported = state(Critical, Critical, 0);
    let selected = select_interval(&check, &reported, Duration::from_secs(300));
    assert_eq!(selected, Duration::from_secs(60));

    let suspecting_change = state(Critical, ExitOk, 0);
    let selected = select_interval(&check, &suspecting_change, Duration::from_secs(300));
    let adapted = adaptive_interval(selected, &suspecting_change);
    assert_eq!(adapted, Duration::from_secs(30));
}

#[test]
fn jitter_is_bounded_and_deterministic_for_the_same_inputs() {
    let host = HostId::new("h1");
    let check = CheckId::new("c1");
    let interval = Duration::from_secs(100);
    let j1 = jitter_for(&host, &check, 1_000, interval);
    let j2 = jitter_for(&host, &check, 1_000, interval);
    assert_eq!(j1, j2);
    assert!(j1 < Duration::from_secs_f64(interval.as_secs_f64() * 0.1));
}

#[test]
fn jitter_changes_only_when_last_check_time_changes() {
    let host = HostId::new("h1");
    let check = CheckId::new("c1");
    let interval = Duration::from_secs(100);
    let j_epoch_a = jitter_for(&host, &check, 1_000, interval);
    let j_epoch_a_again = jitter_for(&host, &check, 1_000, interval);
    assert_eq!(j_epoch_a, j_epoch_a_again);
    let j_epoch_b = jitter_for(&host, &check, 2_000, interval);
    // Not asserting inequality (a hash collision is permissible), just that
    // the computation is a pure function of its inputs.
    let j_epoch_b_again = jitter_for(&host, &check, 2_000, interval);
    assert_eq!(j_epoch_b, j_epoch_b_again);
}

#[test]
fn due_jobs_emits_at_most_one_job_per_pair_per_pass() {
    let host = test_host("a");
    let check = test_check("ping", vec![host.id.clone()], 1);
    let mut hosts_by_id = HashMap::new();
    hosts_by_id.insert(host.id.clone(), host.clone());
    let tracker = StateTracker::new();
    let config = SchedulerConfig::default();

    // First pass seeds the pair; it is never due on the tick it's seeded.
    let jobs = due_jobs(&[check.clone()], &hosts_by_id, &tracker, &config, 0);
    assert!(jobs.is_empty());

    // Long after the default interval, it's due, exactly once.
    let jobs = due_jobs(&[check.clone()], &hosts_by_id, &tracker, &config, 1_000_000);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].host.id, host.id);
    assert_eq!(jobs[0].check.id, check.id);
}

#[test]
fn due_jobs_skips_disabled_checks() {
    let host = test_host("a");
    let mut check = test_check("ping", vec![host.id.clone()], 1);
    check.enabled = false;
    let mut hosts_by_id = HashMap::new();
    hosts_by_id.insert(host.id.clone(), host.clone());
    let tracker = StateTracker::new();
    let config = SchedulerConfig::default();

    let jobs = due_jobs(&[check], &hosts_by_id, &tracker, &config, 1_000_000);
    assert!(jobs.is_empty());
}

#[test]
fn due_jobs_skips_disabled_hosts() {
    let mut host = test_host("a");
    host.enabled = false;
    let check = test_check("ping", vec![host.id.clone()], 1);
    let mut hosts_by_id = HashMap::new();
    hosts_by_id.insert(host.id.clone(), host.clone());
    let tracker = StateTracker::new();
    let config = SchedulerConfig::default();

    let jobs = due_jobs(&[check], &hosts_by_id, &tracker, &config, 1_000_000);
    assert!(jobs.is_empty());
}

#[test]
fn due_jobs_skips_hosts_absent_from_the_host_map() {
    let host_id = HostId::new("ghost");
    let check = test_check("ping", vec![host_id], 1);
    let hosts_by_id = HashMap::new();
    let tracker = StateTracker::new();
    let config = SchedulerConfig::default();

    let jobs = due_jobs(&[check], &hosts_by_id, &tracker, &config, 1_000_000);
    assert!(jobs.is_empty());
}
