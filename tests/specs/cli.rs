// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI specs driven against the built `pulsewatch` binary, reading a
//! store seeded directly via `pw-store` (bypassing the daemon).

use assert_cmd::Command;
use pw_core::{CheckBuilder, HostBuilder, StatusBuilder};
use pw_store::StatusStore;

fn pulsewatch() -> Command {
    Command::cargo_bin("pulsewatch").expect("pulsewatch binary")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn seed_store(dir: &std::path::Path) {
    let store = StatusStore::open(dir).expect("open store");
    store.upsert_host(HostBuilder::default().name("web-1").id("web-1").build()).expect("upsert host");
    store.upsert_check(CheckBuilder::default().name("ping").id("ping-web-1").build()).expect("upsert check");
}

#[test]
fn hosts_list_shows_seeded_hosts() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_store(dir.path());

    let output = pulsewatch().arg("hosts").arg("list").env("PULSEWATCH_STATE_DIR", dir.path()).output().expect("run pulsewatch");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("web-1"));
}

#[test]
fn hosts_list_json_is_valid_and_reflects_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_store(dir.path());

    let output = pulsewatch()
        .args(["hosts", "list", "--output", "json"])
        .env("PULSEWATCH_STATE_DIR", dir.path())
        .output()
        .expect("run pulsewatch");
    assert!(output.status.success());
    let hosts: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0]["id"], "web-1");
}

#[test]
fn checks_list_shows_seeded_checks() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_store(dir.path());

    let output = pulsewatch().arg("checks").arg("list").env("PULSEWATCH_STATE_DIR", dir.path()).output().expect("run pulsewatch");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("ping-web-1"));
}

#[test]
fn status_show_reports_no_status_before_any_check_has_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_store(dir.path());

    let output = pulsewatch().arg("status").arg("show").env("PULSEWATCH_STATE_DIR", dir.path()).output().expect("run pulsewatch");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("No status recorded"));
}

#[test]
fn status_show_filters_by_exit_code_and_honors_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StatusStore::open(dir.path()).expect("open store");
    store
        .update_status(
            StatusBuilder::default().host_id(pw_core::HostId::new("web-1")).check_id(pw_core::CheckId::new("ping-web-1")).exit_code(pw_core::ExitCode::Ok).timestamp_ms(10).build(),
        )
        .expect("update status");
    store
        .update_status(
            StatusBuilder::default().host_id(pw_core::HostId::new("web-2")).check_id(pw_core::CheckId::new("ping-web-2")).exit_code(pw_core::ExitCode::Critical).timestamp_ms(20).build(),
        )
        .expect("update status");

    let output = pulsewatch()
        .args(["status", "show", "--exit-code", "critical"])
        .env("PULSEWATCH_STATE_DIR", dir.path())
        .output()
        .expect("run pulsewatch");
    assert!(output.status.success());
    let text = stdout_of(&output);
    assert!(text.contains("web-2"));
    assert!(!text.contains("web-1"));

    let limited = pulsewatch()
        .args(["status", "show", "--output", "json", "--limit", "1"])
        .env("PULSEWATCH_STATE_DIR", dir.path())
        .output()
        .expect("run pulsewatch");
    assert!(limited.status.success());
    let statuses: Vec<serde_json::Value> = serde_json::from_slice(&limited.stdout).expect("valid json");
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0]["host_id"], "web-2");
}

#[test]
fn hosts_list_on_an_empty_store_reports_none_configured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let _store = StatusStore::open(dir.path()).expect("open store");

    let output = pulsewatch().arg("hosts").arg("list").env("PULSEWATCH_STATE_DIR", dir.path()).output().expect("run pulsewatch");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("No hosts configured"));
}
