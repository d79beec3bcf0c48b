// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The canonical four-value check outcome.

use serde::{Deserialize, Serialize};

/// Outcome of a single check execution, and the value stored as a check's
/// reported state. Stable wire values 0-3; this set must not be extended
/// without a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitCode {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

crate::simple_display! {
    ExitCode {
        Ok => "ok",
        Warning => "warning",
        Critical => "critical",
        Unknown => "unknown",
    }
}

impl ExitCode {
    /// Numeric wire value (process exit-status convention).
    pub const fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    /// Parse a raw process exit status into an `ExitCode`, collapsing any
    /// unrecognized status to `Unknown` rather than panicking.
    pub fn from_status(status: i32) -> Self {
        match status {
            0 => Self::Ok,
            1 => Self::Warning,
            2 => Self::Critical,
            _ => Self::Unknown,
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::Unknown
    }
}

#[cfg(test)]
#[path = "exit_code_tests.rs"]
mod tests;
