// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic zstd-compressed snapshots of [`MaterializedState`], used to
//! bound WAL replay time and as the basis for [`crate::Wal::truncate_before`].

use crate::state::MaterializedState;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("snapshot compression error: {0}")]
    Compression(std::io::Error),
    #[error("snapshot version {0} is newer than this build supports ({1})")]
    TooNew(u32, u32),
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    /// The WAL sequence number this snapshot is current as of.
    processed_seq: u64,
    state: MaterializedState,
}

/// Write a compressed, versioned snapshot to `path` via write-temp + fsync +
/// atomic rename, so a crash mid-write never corrupts the previous snapshot.
pub fn write(path: &Path, processed_seq: u64, state: &MaterializedState) -> Result<(), SnapshotError> {
    let envelope = SnapshotEnvelope {
        version: CURRENT_SNAPSHOT_VERSION,
        processed_seq,
        state: state.clone(),
    };
    let json = serde_json::to_vec(&envelope)?;
    let compressed = zstd::encode_all(json.as_slice(), 0).map_err(SnapshotError::Compression)?;

    let tmp = path.with_extension("snap.tmp");
    {
        let mut f = File::create(&tmp)?;
        f.write_all(&compressed)?;
        f.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    if let Some(dir) = path.parent() {
        if let Ok(dir_file) = File::open(dir) {
            let _ = dir_file.sync_all();
        }
    }
    Ok(())
}

/// Load a snapshot, returning `None` if no file exists yet (first boot).
pub fn load(path: &Path) -> Result<Option<(u64, MaterializedState)>, SnapshotError> {
    if !path.exists() {
        return Ok(None);
    }
    let mut compressed = Vec::new();
    File::open(path)?.read_to_end(&mut compressed)?;
    let json = zstd::decode_all(compressed.as_slice()).map_err(SnapshotError::Compression)?;
    let envelope: SnapshotEnvelope = serde_json::from_slice(&json)?;
    if envelope.version > CURRENT_SNAPSHOT_VERSION {
        return Err(SnapshotError::TooNew(envelope.version, CURRENT_SNAPSHOT_VERSION));
    }
    Ok(Some((envelope.processed_seq, envelope.state)))
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
