// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Facts recorded in the write-ahead log. State is always derived from
//! replaying these, never mutated directly.

use pw_core::{Check, CheckId, Host, HostId, Status};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    HostUpserted { host: Host },
    HostDeleted { host_id: HostId },
    CheckUpserted { check: Check },
    CheckDeleted { check_id: CheckId },
    StatusRecorded { status: Status },
    StatusDeleted { host_id: HostId, check_id: CheckId },
    StatusHistoryPurged { before_ms: u64 },
    StatusesBulkDeleted { pairs: Vec<(HostId, CheckId)> },
}
