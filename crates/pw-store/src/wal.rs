// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log of store events.
//!
//! Entries are appended as single-line JSON records (`{"seq":N,"event":...}`).
//! All entries live in memory for the lifetime of the `Wal`; the file exists
//! purely for durability and replay after a restart. Corruption is only
//! handled at [`Wal::open`] time: a line that fails to parse as UTF-8 JSON
//! truncates the recovered entry list at that point, and the original file
//! (valid prefix plus corruption) is rotated to a `.bak` chain so operators
//! can inspect what was lost.

use crate::StoreEvent;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

const FLUSH_BATCH: usize = 100;
const FLUSH_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Error)]
pub enum WalError {
    #[error("wal io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("wal serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One durable record: its sequence number and the event it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct WalEntry {
    pub seq: u64,
    pub event: StoreEvent,
}

#[derive(Serialize, serde::Deserialize)]
struct WalRecord<E> {
    seq: u64,
    event: E,
}

pub struct Wal {
    path: PathBuf,
    file: File,
    entries: Vec<WalEntry>,
    write_seq: u64,
    processed_seq: u64,
    cursor: usize,
    unflushed_bytes: Vec<u8>,
    pending_unflushed: usize,
    last_flush: Instant,
}

impl Wal {
    /// Open (or create) the WAL at `path`, recovering any existing entries.
    /// `processed_seq` is the watermark recorded by the last snapshot;
    /// `next_unprocessed` will skip entries at or below it.
    pub fn open(path: impl AsRef<Path>, processed_seq: u64) -> Result<Self, WalError> {
        let path = path.as_ref().to_path_buf();
        let (entries, corrupted) = if path.exists() {
            Self::recover(&path)?
        } else {
            (Vec::new(), false)
        };

        if corrupted {
            Self::rotate_backups(&path)?;
            let tmp = path.with_extension("wal.tmp");
            {
                let mut f = File::create(&tmp)?;
                for entry in &entries {
                    let line = serde_json::to_string(&WalRecord { seq: entry.seq, event: &entry.event })?;
                    writeln!(f, "{line}")?;
                }
                f.sync_all()?;
            }
            let bak = path.with_extension("bak");
            fs::rename(&path, &bak)?;
            fs::rename(&tmp, &path)?;
        }

        let write_seq = entries.last().map(|e| e.seq).unwrap_or(0);
        let cursor = entries.iter().take_while(|e| e.seq <= processed_seq).count();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file,
            entries,
            write_seq,
            processed_seq,
            cursor,
            unflushed_bytes: Vec::new(),
            pending_unflushed: 0,
            last_flush: Instant::now(),
        })
    }

    /// Parse `path` line by line, stopping at the first line that isn't
    /// valid UTF-8 JSON matching `WalRecord`. Returns the valid prefix and
    /// whether anything was truncated.
    fn recover(path: &Path) -> Result<(Vec<WalEntry>, bool), WalError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();
        let mut corrupted = false;
        for line in reader.split(b'\n') {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let parsed = std::str::from_utf8(&line)
                .ok()
                .and_then(|s| serde_json::from_str::<WalRecord<StoreEvent>>(s).ok());
            match parsed {
                Some(rec) => entries.push(WalEntry { seq: rec.seq, event: rec.event }),
                None => {
                    corrupted = true;
                    break;
                }
            }
        }
        Ok((entries, corrupted))
    }

    /// Shift `path.bak` → `path.bak.2` → `path.bak.3`, evicting the oldest.
    fn rotate_backups(path: &Path) -> Result<(), WalError> {
        let bak3 = path.with_extension("bak.3");
        if bak3.exists() {
            fs::remove_file(&bak3)?;
        }
        let bak2 = path.with_extension("bak.2");
        if bak2.exists() {
            fs::rename(&bak2, &bak3)?;
        }
        let bak1 = path.with_extension("bak");
        if bak1.exists() {
            fs::rename(&bak1, &bak2)?;
        }
        Ok(())
    }

    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }

    pub fn processed_seq(&self) -> u64 {
        self.processed_seq
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an event, returning its assigned sequence number. Buffered
    /// until [`Wal::flush`]; callers that need a durability guarantee before
    /// returning to their own caller must flush explicitly.
    pub fn append(&mut self, event: &StoreEvent) -> Result<u64, WalError> {
        self.write_seq += 1;
        let seq = self.write_seq;
        let line = serde_json::to_string(&WalRecord { seq, event })?;
        self.unflushed_bytes.extend_from_slice(line.as_bytes());
        self.unflushed_bytes.push(b'\n');
        self.pending_unflushed += 1;
        self.entries.push(WalEntry { seq, event: event.clone() });
        Ok(seq)
    }

    /// Write buffered entries to disk and fsync.
    pub fn flush(&mut self) -> Result<(), WalError> {
        if !self.unflushed_bytes.is_empty() {
            self.file.write_all(&self.unflushed_bytes)?;
            self.file.sync_data()?;
            self.unflushed_bytes.clear();
        }
        self.pending_unflushed = 0;
        self.last_flush = Instant::now();
        Ok(())
    }

    pub fn needs_flush(&self) -> bool {
        self.pending_unflushed >= FLUSH_BATCH || self.last_flush.elapsed() >= FLUSH_INTERVAL
    }

    /// Next entry not yet consumed via this method. Returns `Ok(None)` both
    /// when there is nothing left and (defensively) when corrupt data is
    /// encountered — the WAL itself only ever holds entries it parsed
    /// successfully, so in practice this just means "nothing new".
    pub fn next_unprocessed(&mut self) -> Result<Option<WalEntry>, WalError> {
        match self.entries.get(self.cursor) {
            Some(entry) => {
                self.cursor += 1;
                Ok(Some(entry.clone()))
            }
            None => Ok(None),
        }
    }

    pub fn mark_processed(&mut self, seq: u64) {
        if seq > self.processed_seq {
            self.processed_seq = seq;
        }
    }

    pub fn entries_after(&self, seq: u64) -> Result<Vec<WalEntry>, WalError> {
        Ok(self.entries.iter().filter(|e| e.seq > seq).cloned().collect())
    }

    /// Drop all entries with `seq < min_seq`, in memory and on disk.
    pub fn truncate_before(&mut self, min_seq: u64) -> Result<(), WalError> {
        self.entries.retain(|e| e.seq >= min_seq);
        let tmp = self.path.with_extension("wal.tmp");
        {
            let mut f = File::create(&tmp)?;
            for entry in &self.entries {
                let line =
                    serde_json::to_string(&WalRecord { seq: entry.seq, event: &entry.event })?;
                writeln!(f, "{line}")?;
            }
            f.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.unflushed_bytes.clear();
        self.pending_unflushed = 0;
        Ok(())
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
