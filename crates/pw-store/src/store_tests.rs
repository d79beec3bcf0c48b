// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pw_core::ExitCode;
use tempfile::tempdir;

fn open(dir: &std::path::Path) -> StatusStore {
    StatusStore::open(dir).unwrap()
}

fn status(host: &str, check: &str, exit_code: ExitCode, ts: u64) -> Status {
    Status::builder()
        .host_id(HostId::new(host))
        .check_id(CheckId::new(check))
        .exit_code(exit_code)
        .timestamp_ms(ts)
        .build()
}

#[test]
fn host_upsert_and_get_round_trip() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let host = Host::builder().id(HostId::new("h1")).name("web-1").build();
    store.upsert_host(host.clone()).unwrap();
    assert_eq!(store.get_host(&HostId::new("h1")), Some(host));
    assert_eq!(store.get_hosts().len(), 1);
}

#[test]
fn host_delete_removes_it() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.upsert_host(Host::builder().id(HostId::new("h1")).build()).unwrap();
    store.delete_host(&HostId::new("h1")).unwrap();
    assert!(store.get_host(&HostId::new("h1")).is_none());
}

#[test]
fn check_upsert_and_get_round_trip() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let check = Check::builder().id(CheckId::new("c1")).name("ping").build();
    store.upsert_check(check.clone()).unwrap();
    assert_eq!(store.get_check(&CheckId::new("c1")), Some(check));
}

#[test]
fn update_status_is_visible_immediately() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.update_status(status("h1", "c1", ExitCode::Ok, 10)).unwrap();
    let latest = store.get_status(&HostId::new("h1"), &CheckId::new("c1")).unwrap();
    assert_eq!(latest.exit_code, ExitCode::Ok);
}

#[test]
fn get_statuses_filters_and_sorts_newest_first() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.update_status(status("h1", "c1", ExitCode::Ok, 10)).unwrap();
    store.update_status(status("h2", "c1", ExitCode::Critical, 20)).unwrap();
    store.update_status(status("h1", "c2", ExitCode::Warning, 30)).unwrap();

    let all = store.get_statuses(&StatusFilter::default());
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].timestamp_ms, 30);

    let filtered = store.get_statuses(&StatusFilter { host_id: Some(HostId::new("h1")), ..StatusFilter::default() });
    assert_eq!(filtered.len(), 2);
}

#[test]
fn get_statuses_filters_by_exit_code_and_honors_limit() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.update_status(status("h1", "c1", ExitCode::Ok, 10)).unwrap();
    store.update_status(status("h2", "c1", ExitCode::Critical, 20)).unwrap();
    store.update_status(status("h1", "c2", ExitCode::Critical, 30)).unwrap();

    let critical = store.get_statuses(&StatusFilter { exit_code: Some(ExitCode::Critical), ..StatusFilter::default() });
    assert_eq!(critical.len(), 2);
    assert!(critical.iter().all(|s| s.exit_code == ExitCode::Critical));

    let limited = store.get_statuses(&StatusFilter { limit: Some(1), ..StatusFilter::default() });
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].timestamp_ms, 30);
}

#[test]
fn status_history_is_ascending() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.update_status(status("h1", "c1", ExitCode::Ok, 10)).unwrap();
    store.update_status(status("h1", "c1", ExitCode::Critical, 20)).unwrap();

    let history = store.get_status_history(&HostId::new("h1"), &CheckId::new("c1"));
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].timestamp_ms, 10);
    assert_eq!(history[1].timestamp_ms, 20);
}

#[test]
fn delete_status_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.update_status(status("h1", "c1", ExitCode::Ok, 10)).unwrap();
    store.delete_status(&HostId::new("h1"), &CheckId::new("c1")).unwrap();
    store.delete_status(&HostId::new("h1"), &CheckId::new("c1")).unwrap();
    assert!(store.get_status(&HostId::new("h1"), &CheckId::new("c1")).is_none());
}

#[test]
fn delete_status_history_before_returns_purged_count() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    for ts in [10, 20, 30] {
        store.update_status(status("h1", "c1", ExitCode::Ok, ts)).unwrap();
    }
    let purged = store.delete_status_history_before(25).unwrap();
    assert_eq!(purged, 2);
    assert_eq!(store.get_status_history(&HostId::new("h1"), &CheckId::new("c1")).len(), 1);
}

#[test]
fn bulk_delete_statuses_removes_only_listed_pairs() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.update_status(status("h1", "c1", ExitCode::Ok, 10)).unwrap();
    store.update_status(status("h2", "c1", ExitCode::Ok, 10)).unwrap();
    store.bulk_delete_statuses(vec![(HostId::new("h1"), CheckId::new("c1"))]).unwrap();
    assert!(store.get_status(&HostId::new("h1"), &CheckId::new("c1")).is_none());
    assert!(store.get_status(&HostId::new("h2"), &CheckId::new("c1")).is_some());
}

#[test]
fn stats_reflects_current_counts() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.upsert_host(Host::builder().id(HostId::new("h1")).build()).unwrap();
    store.upsert_check(Check::builder().id(CheckId::new("c1")).build()).unwrap();
    store.update_status(status("h1", "c1", ExitCode::Ok, 10)).unwrap();

    let stats = store.stats();
    assert_eq!(stats.host_count, 1);
    assert_eq!(stats.check_count, 1);
    assert_eq!(stats.status_count, 1);
    assert_eq!(stats.wal_write_seq, 3);
}

#[test]
fn compact_writes_snapshot_and_truncates_wal() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    store.upsert_host(Host::builder().id(HostId::new("h1")).build()).unwrap();
    store.update_status(status("h1", "c1", ExitCode::Ok, 10)).unwrap();
    store.compact().unwrap();

    assert!(dir.path().join("state.snap").exists());
    let stats = store.stats();
    assert_eq!(stats.host_count, 1);
    assert_eq!(stats.status_count, 1);
}

#[test]
fn reopen_after_compact_recovers_full_state() {
    let dir = tempdir().unwrap();
    {
        let store = open(dir.path());
        store.upsert_host(Host::builder().id(HostId::new("h1")).build()).unwrap();
        store.update_status(status("h1", "c1", ExitCode::Warning, 10)).unwrap();
        store.compact().unwrap();
        store.update_status(status("h1", "c1", ExitCode::Critical, 20)).unwrap();
    }

    let reopened = open(dir.path());
    let latest = reopened.get_status(&HostId::new("h1"), &CheckId::new("c1")).unwrap();
    assert_eq!(latest.exit_code, ExitCode::Critical);
    assert_eq!(reopened.get_hosts().len(), 1);
}

#[test]
fn reopen_without_compact_replays_wal_from_scratch() {
    let dir = tempdir().unwrap();
    {
        let store = open(dir.path());
        store.upsert_host(Host::builder().id(HostId::new("h1")).build()).unwrap();
        store.update_status(status("h1", "c1", ExitCode::Ok, 10)).unwrap();
    }

    let reopened = open(dir.path());
    assert_eq!(reopened.get_hosts().len(), 1);
    assert!(reopened.get_status(&HostId::new("h1"), &CheckId::new("c1")).is_some());
}
