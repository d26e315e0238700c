// SPDX-License-Identifier: MIT

//! Error types for configuration parsing and execution.

use thiserror::Error;

/// Errors that can occur while parsing a configuration file.
///
/// Every variant names the configuration file and the 1-based line the
/// diagnostic points at, so the rendered message reads `file:line: ...`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A quote was opened and never closed before the end of the line.
    /// `line` is the line on which the quote was opened.
    #[error("{file}:{line}: unterminated quote ({quote})")]
    UnterminatedQuote { file: String, line: u32, quote: char },

    #[error("{file}:{line}: line exceeds maximum length")]
    LineTooLong { file: String, line: u32 },

    #[error("{file}:{line}: too many arguments on one line")]
    TooManyArguments { file: String, line: u32 },

    #[error("{file}:{line}: unknown command '{command}'")]
    UnknownCommand {
        file: String,
        line: u32,
        command: String,
    },

    #[error("{file}:{line}: missing plugin name")]
    MissingPluginName { file: String, line: u32 },

    #[error("{file}:{line}: invalid plugin argument '{argument}'")]
    InvalidArgument {
        file: String,
        line: u32,
        argument: String,
    },

    #[error("{file}:{line}: invalid use of if-conditional")]
    InvalidCondition { file: String, line: u32 },

    #[error("{file}:{line}: extra else without matching if")]
    ExtraElse { file: String, line: u32 },

    /// An `if` block reached end of input without its `end`. `line` is the
    /// line on which the `if` began.
    #[error("{file}:{line}: unterminated if-conditional (missing 'end')")]
    UnterminatedIf { file: String, line: u32 },
}

impl ParseError {
    /// The line the error points at, if the error has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            ParseError::Io { .. } => None,
            ParseError::UnterminatedQuote { line, .. }
            | ParseError::LineTooLong { line, .. }
            | ParseError::TooManyArguments { line, .. }
            | ParseError::UnknownCommand { line, .. }
            | ParseError::MissingPluginName { line, .. }
            | ParseError::InvalidArgument { line, .. }
            | ParseError::InvalidCondition { line, .. }
            | ParseError::ExtraElse { line, .. }
            | ParseError::UnterminatedIf { line, .. } => Some(*line),
        }
    }
}

/// Errors that can occur while executing a parsed configuration.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// A required `load` action failed. Already-loaded plugins stay loaded;
    /// no further actions run.
    #[error("{file}:{line}: failed to load required plugin '{plugin}'")]
    LoadFailed {
        file: String,
        line: u32,
        plugin: String,
    },
}
