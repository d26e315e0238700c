// SPDX-License-Identifier: MIT

//! Streaming tokenizer for the bootstrap configuration language.
//!
//! The lexer reads from an arbitrary byte source through a fixed-size
//! buffer and produces whitespace-separated word tokens plus explicit
//! newline markers. Quoting (`'`/`"`), backslash escapes, and backslash
//! line continuations are handled here; comment lines are the statement
//! assembler's concern.

use std::io::Read;

use crate::error::ParseError;

/// Maximum number of bytes on one logical line (after continuations are
/// joined). Exceeding it is a hard parse error.
pub const MAX_LINE: usize = 4096;

/// Lines whose first token starts with this character are discarded.
pub const COMMENT_CHAR: char = '#';

/// What a token is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A word: quotes stripped, escapes resolved, continuations joined.
    Word(String),
    /// A line boundary outside any quoted region.
    Newline,
}

/// One token plus the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    fn word(bytes: Vec<u8>, line: u32) -> Self {
        Token {
            kind: TokenKind::Word(String::from_utf8_lossy(&bytes).into_owned()),
            line,
        }
    }
}

/// Streaming tokenizer over a byte source.
///
/// The buffer is refilled incrementally: consumed bytes are compacted to
/// the front and new bytes appended from the source. The source is read
/// exactly once; a read failure or end-of-file permanently closes it.
pub struct Lexer<R> {
    /// Input source; `None` once end of input or a read error was seen.
    source: Option<R>,
    /// File name used in diagnostics.
    file: String,
    /// Fixed-capacity input buffer.
    buf: Box<[u8]>,
    /// Read cursor: `buf[pos..end]` is unconsumed input.
    pos: usize,
    /// Fill cursor.
    end: usize,
    /// Current 1-based line number.
    line: u32,
    /// Bytes consumed on the current logical line.
    line_len: usize,
    /// The token just returned was terminated by a newline; deliver the
    /// newline token on the next call.
    pending_newline: bool,
}

impl<R: Read> Lexer<R> {
    pub fn new(file: impl Into<String>, source: R) -> Self {
        Lexer {
            source: Some(source),
            file: file.into(),
            buf: vec![0u8; MAX_LINE].into_boxed_slice(),
            pos: 0,
            end: 0,
            line: 1,
            line_len: 0,
            pending_newline: false,
        }
    }

    /// File name used in diagnostics.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Current 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Compact consumed bytes to the buffer front and pull more input.
    fn refill(&mut self) -> Result<(), ParseError> {
        if self.pos > 0 {
            self.buf.copy_within(self.pos..self.end, 0);
            self.end -= self.pos;
            self.pos = 0;
        }
        let Some(source) = self.source.as_mut() else {
            return Ok(());
        };
        match source.read(&mut self.buf[self.end..]) {
            Ok(0) => {
                self.source = None;
                Ok(())
            }
            Ok(n) => {
                self.end += n;
                Ok(())
            }
            Err(e) => {
                self.source = None;
                Err(ParseError::Io {
                    file: self.file.clone(),
                    source: e,
                })
            }
        }
    }

    /// Ensure at least one unconsumed byte is buffered.
    ///
    /// Returns `Ok(false)` at end of input.
    fn fill(&mut self) -> Result<bool, ParseError> {
        while self.pos == self.end {
            if self.source.is_none() {
                return Ok(false);
            }
            self.refill()?;
        }
        Ok(true)
    }

    /// Make the byte after the current one visible, if the input has one.
    fn fill_lookahead(&mut self) -> Result<bool, ParseError> {
        while self.pos + 1 >= self.end {
            if self.source.is_none() {
                return Ok(self.pos + 1 < self.end);
            }
            self.refill()?;
        }
        Ok(true)
    }

    /// Consume the current byte, charging it to the logical line budget.
    fn bump(&mut self) -> Result<(), ParseError> {
        self.pos += 1;
        self.line_len += 1;
        if self.line_len > MAX_LINE {
            return Err(ParseError::LineTooLong {
                file: self.file.clone(),
                line: self.line,
            });
        }
        Ok(())
    }

    fn unterminated_quote(&self, quote: u8, opened: u32) -> ParseError {
        ParseError::UnterminatedQuote {
            file: self.file.clone(),
            line: opened,
            quote: quote as char,
        }
    }

    /// Pull the next token from the input.
    ///
    /// Returns `Ok(None)` at end of input. A token terminated by a newline
    /// is returned first; the newline token is delivered on the following
    /// call, after which the line counter has advanced.
    pub fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        if self.pending_newline {
            self.pending_newline = false;
            let token = Token {
                kind: TokenKind::Newline,
                line: self.line,
            };
            self.line += 1;
            self.line_len = 0;
            return Ok(Some(token));
        }

        let mut word: Vec<u8> = Vec::new();
        let mut started = false;
        let mut start_line = self.line;
        // Open quote character and the line it was opened on.
        let mut quote: Option<(u8, u32)> = None;

        loop {
            if !self.fill()? {
                // End of input: treated as end-of-line.
                if let Some((q, opened)) = quote {
                    return Err(self.unterminated_quote(q, opened));
                }
                if started {
                    return Ok(Some(Token::word(word, start_line)));
                }
                return Ok(None);
            }

            let c = self.buf[self.pos];
            match c {
                b'\'' | b'"' => {
                    self.bump()?;
                    match quote {
                        None => {
                            quote = Some((c, self.line));
                            if !started {
                                started = true;
                                start_line = self.line;
                            }
                        }
                        Some((q, _)) if q == c => quote = None,
                        // The opposite quote character is literal inside
                        // a quoted region.
                        Some(_) => word.push(c),
                    }
                }

                b' ' | b'\t' => {
                    self.bump()?;
                    if quote.is_some() {
                        word.push(c);
                    } else if started {
                        return Ok(Some(Token::word(word, start_line)));
                    }
                    // Leading whitespace is skipped; no empty tokens.
                }

                b'\\' => {
                    if !self.fill_lookahead()? {
                        // Backslash is the very last byte of input: literal.
                        self.bump()?;
                        if !started {
                            started = true;
                            start_line = self.line;
                        }
                        word.push(b'\\');
                        continue;
                    }
                    let next = self.buf[self.pos + 1];
                    if next == b'\n' {
                        // Line continuation: consume both, no newline token,
                        // keep assembling the same token. The logical line
                        // budget keeps running across the join.
                        self.bump()?;
                        self.pos += 1;
                        self.line += 1;
                        // Skip leading whitespace on the continuation line.
                        while self.fill()? {
                            match self.buf[self.pos] {
                                b' ' | b'\t' => self.bump()?,
                                _ => break,
                            }
                        }
                    } else {
                        // Escaped character is copied literally. This is how
                        // quotes, whitespace, or the comment marker are
                        // embedded without quoting.
                        self.bump()?;
                        self.bump()?;
                        if !started {
                            started = true;
                            start_line = self.line;
                        }
                        word.push(next);
                    }
                }

                b'\n' => {
                    if let Some((q, opened)) = quote {
                        return Err(self.unterminated_quote(q, opened));
                    }
                    // The newline itself is not charged to the line budget.
                    self.pos += 1;
                    if started {
                        self.pending_newline = true;
                        return Ok(Some(Token::word(word, start_line)));
                    }
                    let token = Token {
                        kind: TokenKind::Newline,
                        line: self.line,
                    };
                    self.line += 1;
                    self.line_len = 0;
                    return Ok(Some(token));
                }

                _ => {
                    self.bump()?;
                    if !started {
                        started = true;
                        start_line = self.line;
                    }
                    word.push(c);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
