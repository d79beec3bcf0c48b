// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pw_core::test_support::{test_check, test_host};
use pw_core::StatusBuilder;
use tempfile::tempdir;

#[test]
fn purge_orphans_removes_entities_absent_from_the_desired_set() {
    let dir = tempdir().expect("tempdir");
    let store = StatusStore::open(dir.path()).expect("open store");
    let keep = test_host("keep");
    let drop = test_host("drop");
    store.upsert_host(keep.clone()).expect("upsert");
    store.upsert_host(drop.clone()).expect("upsert");

    let desired: HashSet<HostId> = [keep.id.clone()].into_iter().collect();
    let (hosts_removed, checks_removed) = purge_orphans(&store, &desired, &HashSet::new());

    assert_eq!(hosts_removed, 1);
    assert_eq!(checks_removed, 0);
    assert!(store.get_host(&keep.id).is_some());
    assert!(store.get_host(&drop.id).is_none());
}

#[test]
fn purge_orphans_removes_status_recorded_against_a_purged_host() {
    let dir = tempdir().expect("tempdir");
    let store = StatusStore::open(dir.path()).expect("open store");
    let keep = test_host("keep");
    let drop = test_host("drop");
    store.upsert_host(keep.clone()).expect("upsert");
    store.upsert_host(drop.clone()).expect("upsert");
    store
        .update_status(StatusBuilder::default().host_id(drop.id.clone()).check_id(CheckId::new("c1")).build())
        .expect("update status");

    let desired: HashSet<HostId> = [keep.id.clone()].into_iter().collect();
    purge_orphans(&store, &desired, &HashSet::new());

    assert!(store.get_status(&drop.id, &CheckId::new("c1")).is_none());
}

#[test]
fn purge_orphans_keeps_everything_in_the_desired_set() {
    let dir = tempdir().expect("tempdir");
    let store = StatusStore::open(dir.path()).expect("open store");
    let host = test_host("a");
    let check = test_check("c", vec![host.id.clone()], 1);
    store.upsert_host(host.clone()).expect("upsert host");
    store.upsert_check(check.clone()).expect("upsert check");

    let hosts: HashSet<HostId> = [host.id.clone()].into_iter().collect();
    let checks: HashSet<CheckId> = [check.id.clone()].into_iter().collect();
    let (hosts_removed, checks_removed) = purge_orphans(&store, &hosts, &checks);

    assert_eq!(hosts_removed, 0);
    assert_eq!(checks_removed, 0);
}
