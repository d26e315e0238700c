// SPDX-License-Identifier: MIT

//! The action tree a configuration file parses into.

use serde::{Deserialize, Serialize};

/// One `KEY` or `KEY=VALUE` plugin argument.
///
/// A missing value is a flag-style boolean argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginArg {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PluginArg {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        PluginArg {
            key: key.into(),
            value,
        }
    }
}

/// Branch operators an `if` statement supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOp {
    /// `if exists NAME` — test whether a plugin is registered.
    PluginExists,
}

/// A `load` or `tryload` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadAction {
    /// Plugin to load.
    pub name: String,
    /// Optional alias to load this particular copy under, so one plugin
    /// can be loaded multiple times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Plugin arguments, in source order.
    pub args: Vec<PluginArg>,
    /// 1-based source line, for diagnostics.
    pub line: u32,
}

/// An `if ... else ... end` block.
///
/// Both branches are owned here; either may be empty. Exactly one of them
/// is executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfAction {
    pub op: ConditionOp,
    /// Plugin name the operator tests.
    pub plugin: String,
    pub positive: Vec<Action>,
    pub negative: Vec<Action>,
    /// 1-based line the `if` began on.
    pub line: u32,
}

/// One parsed instruction in the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Load a plugin; failure aborts the bootstrap.
    Load(LoadAction),
    /// Load a plugin; failure is tolerated.
    TryLoad(LoadAction),
    /// Execute one of two branches based on a plugin test.
    If(IfAction),
}

impl Action {
    /// The source line the action came from.
    pub fn line(&self) -> u32 {
        match self {
            Action::Load(load) | Action::TryLoad(load) => load.line,
            Action::If(branch) => branch.line,
        }
    }
}
