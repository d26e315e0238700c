// SPDX-License-Identifier: MIT

//! Recursive-descent parser: statements to action tree.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::action::{Action, ConditionOp, IfAction, LoadAction, PluginArg};
use crate::error::ParseError;
use crate::executor::PluginManager;
use crate::lexer::{Lexer, COMMENT_CHAR};
use crate::statement::{next_statement, Statement};
use crate::ExecuteError;

const KW_LOAD: &str = "load";
const KW_TRYLOAD: &str = "tryload";
const KW_IF: &str = "if";
const KW_ELSE: &str = "else";
const KW_END: &str = "end";
const KW_AS: &str = "as";
const KW_EXISTS: &str = "exists";

/// A fully parsed configuration file: an ordered sequence of top-level
/// actions plus the file name used in diagnostics.
///
/// A `ConfigFile` is immutable once returned; a failed parse returns no
/// tree at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    file: String,
    actions: Vec<Action>,
}

impl ConfigFile {
    /// Parse the configuration file at `path`.
    pub fn parse_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let file = path.display().to_string();
        match File::open(path) {
            Ok(source) => Self::parse_reader(file, source),
            Err(e) => {
                let err = ParseError::Io { file, source: e };
                tracing::error!(error = %err, "failed to open configuration file");
                Err(err)
            }
        }
    }

    /// Parse configuration text held in memory. `file` is the name used
    /// in diagnostics.
    pub fn parse_str(file: impl Into<String>, text: &str) -> Result<Self, ParseError> {
        Self::parse_reader(file, Cursor::new(text.as_bytes().to_vec()))
    }

    /// Parse a configuration from an arbitrary byte source.
    ///
    /// The whole tree is built before this returns; parsing never
    /// interleaves with execution.
    pub fn parse_reader<R: Read>(file: impl Into<String>, source: R) -> Result<Self, ParseError> {
        let file = file.into();
        let mut lexer = Lexer::new(file.clone(), source);
        let mut actions = Vec::new();

        let result = loop {
            match next_statement(&mut lexer) {
                Ok(Some(stmt)) => match parse_action(&mut lexer, stmt) {
                    Ok(action) => actions.push(action),
                    Err(e) => break Err(e),
                },
                Ok(None) => break Ok(ConfigFile { file, actions }),
                Err(e) => break Err(e),
            }
        };

        if let Err(ref e) = result {
            tracing::error!(error = %e, "configuration parse failed");
        }
        result
    }

    /// File name used in diagnostics.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Top-level actions, in source order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Walk the tree once against `manager`, in source order.
    ///
    /// See [`crate::executor`] for the per-action failure policy. Not
    /// transactional: a failure leaves earlier loads in effect.
    pub fn execute<M: PluginManager>(&self, manager: &mut M) -> Result<(), ExecuteError> {
        crate::executor::execute(&self.file, &self.actions, manager)
    }
}

/// Parse one statement into an action, recursing into `if` blocks.
fn parse_action<R: Read>(lexer: &mut Lexer<R>, stmt: Statement) -> Result<Action, ParseError> {
    match stmt.args[0].as_str() {
        KW_LOAD => Ok(Action::Load(parse_load(lexer.file(), &stmt)?)),
        KW_TRYLOAD => Ok(Action::TryLoad(parse_load(lexer.file(), &stmt)?)),
        KW_IF => parse_if(lexer, &stmt),
        other => Err(ParseError::UnknownCommand {
            file: lexer.file().to_string(),
            line: stmt.line,
            command: other.to_string(),
        }),
    }
}

/// Parse the tail of a `load`/`tryload` statement:
/// `NAME [as INSTANCE] [KEY[=VALUE]...]`.
fn parse_load(file: &str, stmt: &Statement) -> Result<LoadAction, ParseError> {
    let argv = &stmt.args[1..];
    let Some(name) = argv.first() else {
        return Err(ParseError::MissingPluginName {
            file: file.to_string(),
            line: stmt.line,
        });
    };

    let (instance, start) = if argv.len() > 2 && argv[1] == KW_AS {
        (Some(argv[2].clone()), 3)
    } else {
        (None, 1)
    };

    let mut args = Vec::new();
    for arg in &argv[start..] {
        // A comment marker stops argument scanning for this statement.
        if arg.starts_with(COMMENT_CHAR) {
            break;
        }
        match arg.split_once('=') {
            Some((key, _)) if key.is_empty() => {
                return Err(ParseError::InvalidArgument {
                    file: file.to_string(),
                    line: stmt.line,
                    argument: arg.clone(),
                });
            }
            Some((key, value)) => args.push(PluginArg::new(key, Some(value.to_string()))),
            None => args.push(PluginArg::new(arg.clone(), None)),
        }
    }

    Ok(LoadAction {
        name: name.clone(),
        instance,
        args,
        line: stmt.line,
    })
}

/// Parse an `if exists NAME ... [else ...] end` block, recursively.
///
/// On any failure the partially built branches are dropped before the
/// error propagates; no partial tree survives.
fn parse_if<R: Read>(lexer: &mut Lexer<R>, stmt: &Statement) -> Result<Action, ParseError> {
    let file = lexer.file().to_string();
    if stmt.args.len() < 3 {
        return Err(ParseError::InvalidCondition {
            file,
            line: stmt.line,
        });
    }

    let op = &stmt.args[1];
    if op != KW_EXISTS {
        // Reported, then parsed as if `exists` had been written.
        tracing::error!(
            file = %file,
            line = stmt.line,
            operator = %op,
            "unknown operator in if-conditional, treating as 'exists'"
        );
    }
    let plugin = stmt.args[2].clone();

    let mut positive = Vec::new();
    let mut negative = Vec::new();
    let mut on_positive = true;

    while let Some(body) = next_statement(lexer)? {
        if body.args.len() == 1 {
            if body.args[0] == KW_END {
                return Ok(Action::If(IfAction {
                    op: ConditionOp::PluginExists,
                    plugin,
                    positive,
                    negative,
                    line: stmt.line,
                }));
            }
            if body.args[0] == KW_ELSE {
                if on_positive {
                    on_positive = false;
                    continue;
                }
                return Err(ParseError::ExtraElse {
                    file,
                    line: body.line,
                });
            }
        }

        let action = parse_action(lexer, body)?;
        if on_positive {
            positive.push(action);
        } else {
            negative.push(action);
        }
    }

    Err(ParseError::UnterminatedIf {
        file,
        line: stmt.line,
    })
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
