// SPDX-License-Identifier: MIT

//! Tree-walking executor for parsed configurations.
//!
//! Failure policy per action kind: `load` must succeed or the whole
//! bootstrap aborts; `tryload` failures are absorbed; `if` evaluates its
//! condition once and runs exactly one branch. Execution is not
//! transactional — plugins loaded before a failure stay loaded.

use crate::action::{Action, ConditionOp, PluginArg};
use crate::error::ExecuteError;

/// The plugin-management collaborator the executor drives.
///
/// Implemented by the daemon's plugin registry; tests substitute
/// recording fakes.
pub trait PluginManager {
    /// Load `name`, optionally under the alias `instance`, with the given
    /// arguments. Returns `false` when loading fails.
    fn load(&mut self, name: &str, instance: Option<&str>, args: &[PluginArg]) -> bool;

    /// Whether a plugin named `name` is registered.
    fn exists(&self, name: &str) -> bool;
}

/// Execute `actions` in source order against `manager`.
pub(crate) fn execute<M: PluginManager>(
    file: &str,
    actions: &[Action],
    manager: &mut M,
) -> Result<(), ExecuteError> {
    match exec_sequence(file, actions, manager) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(error = %e, "bootstrap configuration failed");
            Err(e)
        }
    }
}

fn exec_sequence<M: PluginManager>(
    file: &str,
    actions: &[Action],
    manager: &mut M,
) -> Result<(), ExecuteError> {
    for action in actions {
        exec_action(file, action, manager)?;
    }
    Ok(())
}

fn exec_action<M: PluginManager>(
    file: &str,
    action: &Action,
    manager: &mut M,
) -> Result<(), ExecuteError> {
    match action {
        Action::Load(load) => {
            tracing::debug!(plugin = %load.name, "loading plugin");
            if manager.load(&load.name, load.instance.as_deref(), &load.args) {
                Ok(())
            } else {
                Err(ExecuteError::LoadFailed {
                    file: file.to_string(),
                    line: load.line,
                    plugin: load.name.clone(),
                })
            }
        }

        Action::TryLoad(load) => {
            tracing::debug!(plugin = %load.name, "loading optional plugin");
            if !manager.load(&load.name, load.instance.as_deref(), &load.args) {
                tracing::warn!(plugin = %load.name, "optional plugin failed to load, continuing");
            }
            Ok(())
        }

        Action::If(branch) => {
            let ConditionOp::PluginExists = branch.op;
            let taken = if manager.exists(&branch.plugin) {
                &branch.positive
            } else {
                &branch.negative
            };
            // The branch not taken is never evaluated.
            exec_sequence(file, taken, manager)
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
