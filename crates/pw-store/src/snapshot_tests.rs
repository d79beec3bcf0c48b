// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::StoreEvent;
use pw_core::{ExitCode, HostId};
use tempfile::tempdir;

#[test]
fn write_then_load_round_trips_state_and_seq() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.snap");

    let mut state = MaterializedState::default();
    let host = pw_core::Host::builder().id(HostId::new("h1")).build();
    state.apply_event(&StoreEvent::HostUpserted { host });

    write(&path, 42, &state).unwrap();
    let (seq, loaded) = load(&path).unwrap().unwrap();
    assert_eq!(seq, 42);
    assert_eq!(loaded.hosts.len(), 1);
    assert!(loaded.hosts.contains_key(&HostId::new("h1")));
}

#[test]
fn load_missing_file_returns_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nonexistent.snap");
    assert!(load(&path).unwrap().is_none());
}

#[test]
fn load_rejects_future_version() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.snap");

    let envelope = SnapshotEnvelope {
        version: CURRENT_SNAPSHOT_VERSION + 1,
        processed_seq: 1,
        state: MaterializedState::default(),
    };
    let json = serde_json::to_vec(&envelope).unwrap();
    let compressed = zstd::encode_all(json.as_slice(), 0).unwrap();
    std::fs::write(&path, compressed).unwrap();

    let err = load(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::TooNew(_, _)));
}

#[test]
fn write_overwrites_previous_snapshot_atomically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.snap");

    let mut state = MaterializedState::default();
    write(&path, 1, &state).unwrap();

    let host = pw_core::Host::builder().id(HostId::new("h2")).build();
    state.apply_event(&StoreEvent::HostUpserted { host });
    write(&path, 2, &state).unwrap();

    let (seq, loaded) = load(&path).unwrap().unwrap();
    assert_eq!(seq, 2);
    assert_eq!(loaded.hosts.len(), 1);
    assert!(!path.with_extension("snap.tmp").exists());
}

#[test]
fn round_trips_status_history() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.snap");

    let mut state = MaterializedState::default();
    let status = pw_core::Status::builder()
        .host_id(HostId::new("h1"))
        .check_id(pw_core::CheckId::new("c1"))
        .exit_code(ExitCode::Critical)
        .timestamp_ms(100)
        .build();
    state.apply_event(&StoreEvent::StatusRecorded { status });

    write(&path, 7, &state).unwrap();
    let (_, loaded) = load(&path).unwrap().unwrap();
    let latest = loaded
        .get_latest(&HostId::new("h1"), &pw_core::CheckId::new("c1"))
        .unwrap();
    assert_eq!(latest.exit_code, ExitCode::Critical);
}
