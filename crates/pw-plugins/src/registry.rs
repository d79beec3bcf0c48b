// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A registry mapping `check.type` to its [`Plugin`] implementation,
//! built once at startup and immutable afterward.

use crate::{Plugin, PingPlugin, PluginError, ScriptPlugin};
use std::collections::HashMap;
use std::sync::Arc;

pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
    /// The built-in set: `ping` and `script`.
    pub fn with_builtins() -> Self {
        let mut registry = Self { plugins: HashMap::new() };
        registry.register(Arc::new(PingPlugin));
        registry.register(Arc::new(ScriptPlugin));
        registry
    }

    pub fn empty() -> Self {
        Self { plugins: HashMap::new() }
    }

    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.insert(plugin.name().to_string(), plugin);
    }

    pub fn get(&self, check_type: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(check_type).cloned()
    }

    /// Validate every registered check's options against its plugin's
    /// `init`, surfacing the first failure encountered.
    pub fn validate_options(
        &self,
        check_type: &str,
        options: &HashMap<String, String>,
    ) -> Result<(), PluginError> {
        match self.get(check_type) {
            Some(plugin) => plugin.init(options),
            None => Err(PluginError::InitFailed(format!("unknown check type '{check_type}'"))),
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
