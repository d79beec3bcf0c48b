// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable status store: a WAL-backed [`MaterializedState`] behind a
//! lock, with periodic snapshotting so replay stays bounded.

use crate::state::MaterializedState;
use crate::wal::Wal;
use crate::{snapshot, StoreError, StoreEvent, StoreResult};
use parking_lot::Mutex;
use pw_core::{Check, CheckId, ExitCode, Host, HostId, Status};
use std::path::{Path, PathBuf};

/// Filters for [`StatusStore::get_statuses`]. `None` means "no restriction".
/// `limit` caps the number of (already newest-first sorted) results returned.
#[derive(Debug, Clone, Default)]
pub struct StatusFilter {
    pub host_id: Option<HostId>,
    pub check_id: Option<CheckId>,
    pub exit_code: Option<ExitCode>,
    pub limit: Option<usize>,
}

impl StatusFilter {
    fn matches(&self, status: &Status) -> bool {
        let host_ok = match &self.host_id {
            Some(h) => h == &status.host_id,
            None => true,
        };
        let check_ok = match &self.check_id {
            Some(c) => c == &status.check_id,
            None => true,
        };
        let exit_ok = match &self.exit_code {
            Some(e) => *e == status.exit_code,
            None => true,
        };
        host_ok && check_ok && exit_ok
    }
}

/// Point-in-time counts surfaced to operators and the CLI.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct StoreStats {
    pub host_count: usize,
    pub check_count: usize,
    pub status_count: usize,
    pub wal_write_seq: u64,
    pub wal_processed_seq: u64,
}

struct Inner {
    wal: Wal,
    state: MaterializedState,
    snapshot_path: PathBuf,
}

/// Durable inventory and status storage backed by a write-ahead log and
/// periodic snapshots. All operations that mutate state append an event to
/// the WAL, flush it durably, then apply it to the in-memory materialized
/// view before returning — so a caller observing success knows the change
/// survives a crash.
pub struct StatusStore {
    inner: Mutex<Inner>,
}

impl StatusStore {
    /// Open the store rooted at `state_dir`, replaying `state_dir/state.snap`
    /// and `state_dir/events.wal` to reconstruct current state.
    pub fn open(state_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let state_dir = state_dir.as_ref();
        std::fs::create_dir_all(state_dir).map_err(|e| StoreError::BackendUnavailable(e.to_string()))?;

        let snapshot_path = state_dir.join("state.snap");
        let (processed_seq, mut state) = snapshot::load(&snapshot_path)?.unwrap_or_default();

        let mut wal = Wal::open(state_dir.join("events.wal"), processed_seq)?;
        while let Some(entry) = wal.next_unprocessed()? {
            state.apply_event(&entry.event);
            wal.mark_processed(entry.seq);
        }

        Ok(Self {
            inner: Mutex::new(Inner { wal, state, snapshot_path }),
        })
    }

    fn apply_durably(&self, inner: &mut Inner, event: StoreEvent) -> StoreResult<()> {
        let seq = inner.wal.append(&event)?;
        inner.wal.flush()?;
        inner.state.apply_event(&event);
        inner.wal.mark_processed(seq);
        Ok(())
    }

    // ---- hosts ----

    pub fn get_hosts(&self) -> Vec<Host> {
        let inner = self.inner.lock();
        inner.state.hosts.values().cloned().collect()
    }

    pub fn get_host(&self, host_id: &HostId) -> Option<Host> {
        let inner = self.inner.lock();
        inner.state.hosts.get(host_id).cloned()
    }

    pub fn upsert_host(&self, host: Host) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        self.apply_durably(&mut inner, StoreEvent::HostUpserted { host })
    }

    pub fn delete_host(&self, host_id: &HostId) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        self.apply_durably(&mut inner, StoreEvent::HostDeleted { host_id: host_id.clone() })
    }

    // ---- checks ----

    pub fn get_checks(&self) -> Vec<Check> {
        let inner = self.inner.lock();
        inner.state.checks.values().cloned().collect()
    }

    pub fn get_check(&self, check_id: &CheckId) -> Option<Check> {
        let inner = self.inner.lock();
        inner.state.checks.get(check_id).cloned()
    }

    pub fn upsert_check(&self, check: Check) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        self.apply_durably(&mut inner, StoreEvent::CheckUpserted { check })
    }

    pub fn delete_check(&self, check_id: &CheckId) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        self.apply_durably(&mut inner, StoreEvent::CheckDeleted { check_id: check_id.clone() })
    }

    // ---- statuses ----

    /// Current status for every (host, check) pair matching `filter`,
    /// newest-first by `timestamp_ms`.
    pub fn get_statuses(&self, filter: &StatusFilter) -> Vec<Status> {
        let inner = self.inner.lock();
        let mut out: Vec<Status> =
            inner.state.latest_status.values().filter(|s| filter.matches(s)).cloned().collect();
        out.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
        if let Some(limit) = filter.limit {
            out.truncate(limit);
        }
        out
    }

    pub fn get_status(&self, host_id: &HostId, check_id: &CheckId) -> Option<Status> {
        let inner = self.inner.lock();
        inner.state.get_latest(host_id, check_id).cloned()
    }

    /// Record a new status. Durable before returning.
    pub fn update_status(&self, status: Status) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        self.apply_durably(&mut inner, StoreEvent::StatusRecorded { status })
    }

    /// Ascending (oldest-first) history for one pair.
    pub fn get_status_history(&self, host_id: &HostId, check_id: &CheckId) -> Vec<Status> {
        let inner = self.inner.lock();
        inner
            .state
            .history
            .get(&(host_id.clone(), check_id.clone()))
            .cloned()
            .unwrap_or_default()
    }

    /// Remove the current status for one pair. Idempotent: deleting an
    /// already-absent pair is not an error.
    pub fn delete_status(&self, host_id: &HostId, check_id: &CheckId) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        self.apply_durably(
            &mut inner,
            StoreEvent::StatusDeleted { host_id: host_id.clone(), check_id: check_id.clone() },
        )
    }

    /// Purge history entries older than `before_ms` across all pairs,
    /// returning how many entries were dropped.
    pub fn delete_status_history_before(&self, before_ms: u64) -> StoreResult<usize> {
        let mut inner = self.inner.lock();
        let before: usize = inner.state.history.values().map(|v| v.len()).sum();
        self.apply_durably(&mut inner, StoreEvent::StatusHistoryPurged { before_ms })?;
        let after: usize = inner.state.history.values().map(|v| v.len()).sum();
        Ok(before - after)
    }

    pub fn bulk_delete_statuses(&self, pairs: Vec<(HostId, CheckId)>) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        self.apply_durably(&mut inner, StoreEvent::StatusesBulkDeleted { pairs })
    }

    // ---- maintenance ----

    /// Write a snapshot of current state and truncate the WAL to entries
    /// after the snapshotted sequence. Safe to call concurrently with normal
    /// operation since the lock is held for the whole operation.
    pub fn compact(&self) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let seq = inner.wal.processed_seq();
        snapshot::write(&inner.snapshot_path, seq, &inner.state)?;
        inner.wal.truncate_before(seq + 1)?;
        Ok(())
    }

    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        StoreStats {
            host_count: inner.state.hosts.len(),
            check_count: inner.state.checks.len(),
            status_count: inner.state.latest_status.len(),
            wal_write_seq: inner.wal.write_seq(),
            wal_processed_seq: inner.wal.processed_seq(),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
