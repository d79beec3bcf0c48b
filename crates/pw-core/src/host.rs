// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitored host inventory entries.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// Identifier for a monitored host. Hosts are declared externally (config),
/// so the id is an operator-assigned opaque string rather than a generated one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(pub String);

impl HostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HostId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for HostId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for HostId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HostId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for HostId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A host entry from the declarative inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub id: HostId,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

fn default_enabled() -> bool {
    true
}

impl Host {
    /// Label used in log lines and notification templates: the display
    /// name when set, else the bare name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct HostBuilder => Host {
        into {
            name: String = "host",
            id: HostId = HostId::new("host-1"),
        }
        set {
            enabled: bool = true,
            created_at_ms: u64 = 0,
            updated_at_ms: u64 = 0,
        }
        option {
            display_name: String = None,
            ipv4: String = None,
            hostname: String = None,
            group: String = None,
        }
        computed {
            tags: HashMap<String, String> = HashMap::new(),
        }
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
