// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Bootstrap configuration language for the plugd daemon.
//!
//! A plugd configuration file is a small line-oriented language that names
//! the plugins to load at startup, optionally conditioned on which plugins
//! are registered:
//!
//! ```text
//! # core plugins
//! load console
//! load heartbeat as watchdog interval=30
//!
//! if exists dbus
//!     load dbus address='unix:path=/run/bus' verbose
//! else
//!     tryload fallback-ipc
//! end
//! ```
//!
//! Parsing is a strict parse-then-run pipeline: [`ConfigFile::parse_path`]
//! builds the whole action tree (or fails with a [`ParseError`] naming the
//! file and line), and [`ConfigFile::execute`] walks it once against a
//! [`PluginManager`].
//!
//! # Language summary
//!
//! - `load NAME [as INSTANCE] [KEY[=VALUE]...]` — load a plugin; failure
//!   aborts the bootstrap.
//! - `tryload ...` — same shape, failure is tolerated.
//! - `if exists NAME ... [else ...] end` — run one of two branches based
//!   on whether a plugin is registered; blocks nest.
//! - `#` starts a comment line; `'`/`"` quote; `\` escapes, and a
//!   backslash at end of line joins the next line into the same statement.

mod action;
mod error;
mod executor;
mod lexer;
mod parser;
mod statement;

pub use action::{Action, ConditionOp, IfAction, LoadAction, PluginArg};
pub use error::{ExecuteError, ParseError};
pub use executor::PluginManager;
pub use lexer::{Lexer, Token, TokenKind, COMMENT_CHAR, MAX_LINE};
pub use parser::ConfigFile;
pub use statement::{Statement, MAX_ARGS};
