// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay.

use crate::StoreEvent;
use pw_core::{CheckId, HostId, Status};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Materialized state built from WAL events.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MaterializedState {
    pub hosts: HashMap<HostId, pw_core::Host>,
    pub checks: HashMap<CheckId, pw_core::Check>,
    /// Latest status per (host_id, check_id).
    pub latest_status: HashMap<(HostId, CheckId), Status>,
    /// Full history per (host_id, check_id), oldest first.
    pub history: HashMap<(HostId, CheckId), Vec<Status>>,
}

impl MaterializedState {
    /// Apply an event to derive state changes.
    ///
    /// # Idempotency requirement
    ///
    /// All handlers here MUST be idempotent: applying the same event twice
    /// produces the same state as applying it once, since events are
    /// replayed on every restart. Use assignment instead of mutation for
    /// anything that isn't already keyed by the entity's own identity.
    pub fn apply_event(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::HostUpserted { host } => {
                self.hosts.insert(host.id.clone(), host.clone());
            }
            StoreEvent::HostDeleted { host_id } => {
                self.hosts.remove(host_id);
            }
            StoreEvent::CheckUpserted { check } => {
                self.checks.insert(check.id.clone(), check.clone());
            }
            StoreEvent::CheckDeleted { check_id } => {
                self.checks.remove(check_id);
            }
            StoreEvent::StatusRecorded { status } => {
                let key = (status.host_id.clone(), status.check_id.clone());
                self.latest_status.insert(key.clone(), status.clone());
                self.history.entry(key).or_default().push(status.clone());
            }
            StoreEvent::StatusDeleted { host_id, check_id } => {
                let key = (host_id.clone(), check_id.clone());
                self.latest_status.remove(&key);
            }
            StoreEvent::StatusHistoryPurged { before_ms } => {
                for history in self.history.values_mut() {
                    history.retain(|s| s.timestamp_ms >= *before_ms);
                }
            }
            StoreEvent::StatusesBulkDeleted { pairs } => {
                for (host_id, check_id) in pairs {
                    let key = (host_id.clone(), check_id.clone());
                    self.latest_status.remove(&key);
                    self.history.remove(&key);
                }
            }
        }
    }

    pub fn get_latest(&self, host_id: &HostId, check_id: &CheckId) -> Option<&Status> {
        self.latest_status.get(&(host_id.clone(), check_id.clone()))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
