// SPDX-License-Identifier: MIT

//! Statement assembly: tokens grouped into one argument list per logical
//! line, with blank and comment lines discarded.

use std::io::Read;

use crate::error::ParseError;
use crate::lexer::{Lexer, TokenKind, COMMENT_CHAR};

/// Maximum number of arguments (keyword included) on one statement.
pub const MAX_ARGS: usize = 64;

/// One logical line's ordered argument list.
///
/// The first element is the action keyword, the rest are its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based line the statement started on.
    pub line: u32,
    pub args: Vec<String>,
}

/// Pull the next statement from the lexer.
///
/// Blank lines, lines whose first token starts with [`COMMENT_CHAR`], and
/// lines whose first token is empty (a lone `''`) produce nothing. End of
/// input flushes a pending statement even without a trailing newline;
/// `Ok(None)` means the input is exhausted.
pub(crate) fn next_statement<R: Read>(
    lexer: &mut Lexer<R>,
) -> Result<Option<Statement>, ParseError> {
    let mut args: Vec<String> = Vec::new();
    let mut line = lexer.line();

    while let Some(token) = lexer.next_token()? {
        match token.kind {
            TokenKind::Word(word) => {
                if args.is_empty() {
                    line = token.line;
                }
                if args.len() == MAX_ARGS {
                    return Err(ParseError::TooManyArguments {
                        file: lexer.file().to_string(),
                        line,
                    });
                }
                args.push(word);
            }
            TokenKind::Newline => {
                if is_ignored(&args) {
                    args.clear();
                    continue;
                }
                return Ok(Some(Statement { line, args }));
            }
        }
    }

    if is_ignored(&args) {
        return Ok(None);
    }
    Ok(Some(Statement { line, args }))
}

/// Blank, comment, or empty-first-token lines carry no statement.
fn is_ignored(args: &[String]) -> bool {
    match args.first() {
        None => true,
        Some(first) => first.is_empty() || first.starts_with(COMMENT_CHAR),
    }
}

#[cfg(test)]
#[path = "statement_tests.rs"]
mod tests;
