// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upsert-only reconciliation (§4.1): never deletes, and a single entity's
//! failure never aborts the pass.

use pw_core::{Check, Host};
use pw_store::StatusStore;

/// Upsert every desired host and check into `store`. Per-entity failures
/// are logged and skipped; the pass always processes every entity.
pub fn reconcile(store: &StatusStore, desired_hosts: &[Host], desired_checks: &[Check]) {
    for host in desired_hosts {
        if let Err(error) = store.upsert_host(host.clone()) {
            tracing::error!(%error, host = %host.id, "failed to upsert host during reconcile");
        }
    }
    for check in desired_checks {
        if let Err(error) = store.upsert_check(check.clone()) {
            tracing::error!(%error, check = %check.id, "failed to upsert check during reconcile");
        }
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
