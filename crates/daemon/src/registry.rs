// SPDX-License-Identifier: MIT

//! In-memory plugin registry.
//!
//! Built-in plugins are registered up front as descriptors; the bootstrap
//! executor drives loading through the [`PluginManager`] trait. Dynamic
//! linking is out of scope, so the descriptor table is the full universe
//! of loadable plugins.

use std::collections::HashMap;

use plugd_config::{PluginArg, PluginManager};
use thiserror::Error;
use tracing::{info, warn};

/// Errors a plugin init hook can report.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("invalid argument '{key}={value}': {reason}")]
    InvalidArgument {
        key: String,
        value: String,
        reason: String,
    },

    #[error("unknown argument '{key}'")]
    UnknownArgument { key: String },
}

/// A built-in plugin: its name and the hook run when an instance loads.
///
/// The hook validates arguments and brings the instance up; returning an
/// error rejects the load.
#[derive(Clone, Copy)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub init: fn(&PluginInstance) -> Result<(), PluginError>,
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

/// One loaded copy of a plugin.
///
/// The instance name defaults to the plugin name; loading the same plugin
/// twice requires distinct instance names.
#[derive(Debug, Clone)]
pub struct PluginInstance {
    pub plugin: String,
    pub instance: String,
    pub args: Vec<PluginArg>,
}

impl PluginInstance {
    /// Look up an argument value by key.
    pub fn arg(&self, key: &str) -> Option<Option<&str>> {
        self.args
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_deref())
    }
}

/// Descriptor table plus the instances loaded so far.
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: HashMap<&'static str, PluginDescriptor>,
    loaded: Vec<PluginInstance>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in descriptors.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in crate::plugins::builtins() {
            registry.register(descriptor);
        }
        registry
    }

    /// Register a descriptor, replacing any previous one of the same name.
    pub fn register(&mut self, descriptor: PluginDescriptor) {
        self.descriptors.insert(descriptor.name, descriptor);
    }

    /// Instances loaded so far, in load order.
    pub fn loaded(&self) -> &[PluginInstance] {
        &self.loaded
    }

    fn instance_loaded(&self, instance: &str) -> bool {
        self.loaded.iter().any(|i| i.instance == instance)
    }
}

impl PluginManager for Registry {
    fn load(&mut self, name: &str, instance: Option<&str>, args: &[PluginArg]) -> bool {
        let Some(descriptor) = self.descriptors.get(name).copied() else {
            warn!(plugin = %name, "no such plugin");
            return false;
        };

        let instance = instance.unwrap_or(name);
        if self.instance_loaded(instance) {
            warn!(plugin = %name, instance = %instance, "instance name already in use");
            return false;
        }

        let candidate = PluginInstance {
            plugin: name.to_string(),
            instance: instance.to_string(),
            args: args.to_vec(),
        };
        if let Err(e) = (descriptor.init)(&candidate) {
            warn!(plugin = %name, instance = %instance, error = %e, "plugin init failed");
            return false;
        }

        info!(plugin = %name, instance = %instance, "plugin loaded");
        self.loaded.push(candidate);
        true
    }

    fn exists(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
