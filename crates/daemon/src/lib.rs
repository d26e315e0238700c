// SPDX-License-Identifier: MIT

//! plugd daemon library
//!
//! Plugin registry and built-in plugin descriptors; the `plugd` binary
//! wires these to the bootstrap configuration language.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod plugins;
pub mod registry;

pub use registry::{PluginDescriptor, PluginError, PluginInstance, Registry};
