// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pw-store: durable inventory and status storage for the Pulsewatch
//! monitoring daemon. A write-ahead log plus periodic zstd-compressed
//! snapshots back an in-memory materialized view; every mutation is durable
//! before the call returns.
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod error;
mod event;
mod snapshot;
mod state;
mod store;
mod wal;

pub use error::{StoreError, StoreResult};
pub use event::StoreEvent;
pub use snapshot::{SnapshotError, CURRENT_SNAPSHOT_VERSION};
pub use state::MaterializedState;
pub use store::{StatusFilter, StatusStore, StoreStats};
pub use wal::{Wal, WalEntry, WalError};
