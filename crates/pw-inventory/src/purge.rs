// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orphan purging: a separate operation from `reconcile` that deletes
//! entities the store holds but the desired set no longer names. Runs on
//! a periodic schedule (default 6h) and on explicit request.

use pw_core::{CheckId, HostId};
use pw_store::{StatusFilter, StatusStore};
use std::collections::HashSet;

/// Delete every stored host/check not present in `desired_host_ids` /
/// `desired_check_ids`, along with any status recorded against them.
/// Returns the count of each kind removed.
pub fn purge_orphans(
    store: &StatusStore,
    desired_host_ids: &HashSet<HostId>,
    desired_check_ids: &HashSet<CheckId>,
) -> (usize, usize) {
    let mut orphaned_pairs: HashSet<(HostId, CheckId)> = HashSet::new();

    let mut hosts_removed = 0;
    for host in store.get_hosts() {
        if !desired_host_ids.contains(&host.id) {
            let filter = StatusFilter { host_id: Some(host.id.clone()), ..StatusFilter::default() };
            orphaned_pairs.extend(store.get_statuses(&filter).into_iter().map(|s| (s.host_id, s.check_id)));
            match store.delete_host(&host.id) {
                Ok(()) => hosts_removed += 1,
                Err(error) => tracing::error!(%error, host = %host.id, "failed to purge orphaned host"),
            }
        }
    }

    let mut checks_removed = 0;
    for check in store.get_checks() {
        if !desired_check_ids.contains(&check.id) {
            let filter = StatusFilter { check_id: Some(check.id.clone()), ..StatusFilter::default() };
            orphaned_pairs.extend(store.get_statuses(&filter).into_iter().map(|s| (s.host_id, s.check_id)));
            match store.delete_check(&check.id) {
                Ok(()) => checks_removed += 1,
                Err(error) => tracing::error!(%error, check = %check.id, "failed to purge orphaned check"),
            }
        }
    }

    if !orphaned_pairs.is_empty() {
        let pairs: Vec<(HostId, CheckId)> = orphaned_pairs.into_iter().collect();
        if let Err(error) = store.bulk_delete_statuses(pairs) {
            tracing::error!(%error, "failed to purge statuses for orphaned hosts/checks");
        }
    }

    (hosts_removed, checks_removed)
}

#[cfg(test)]
#[path = "purge_tests.rs"]
mod tests;
