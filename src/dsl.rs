//! Loader for the normal-algorithm DSL.
//!
//! A source file is read as three consecutive blocks that share a single line
//! cursor:
//!
//! ```text
//! LineSource ──► parse_alphabet     T = { ... }         (first significant line)
//!            ──► parse_source_word  V = ...             (next significant line)
//!            ──► parse_rules        pattern -> repl     (every remaining line)
//!                                   pattern ->. repl
//! ```
//!
//! Blank lines and `//` comment lines are skipped by every block. Inside a
//! significant line leading spaces and tabs are ignored, but past that point
//! a space is an ordinary symbol; tabs are the only in-line separator.
//!
//! ## Errors
//!
//! Warnings (duplicate symbols, symbols missing from the alphabet, empty
//! source word) are reported and loading continues. Syntax errors abort the
//! alphabet and source-word blocks immediately; in the rule block they discard
//! the offending rule, later lines are still checked, and the block fails at
//! the end. Any failed block aborts the whole load.
//!
//! - `source.rs`: the [`LineSource`] trait and [`BufLines`].
//! - `cursor.rs`: per-line character cursor used by the block grammars.
//! - `alphabet.rs`, `word.rs`, `rules.rs`: one block grammar each.

#[path = "dsl/alphabet.rs"]
mod alphabet;
#[path = "dsl/cursor.rs"]
mod cursor;
#[path = "dsl/rules.rs"]
mod rules;
#[path = "dsl/source.rs"]
mod source;
#[path = "dsl/word.rs"]
mod word;


pub use source::{BufLines, LineSource};

use crate::{Diagnostic, DiagnosticSink, LoadError, Program};
use cursor::LineCursor;
use std::io;

/// A syntax error inside one line: the column it points at and what was expected.
#[derive(Debug)]
struct Syntax {
    column: usize,
    message: String,
}

impl Syntax {
    fn new(column: usize, message: impl Into<String>) -> Self {
        Syntax { column, message: message.into() }
    }
}

/// Reads a program block by block from a [`LineSource`].
///
/// ```
/// use markov_algo::{BufLines, Diagnostics, Parser};
///
/// let mut lines = BufLines::from_text("T = {a}\nV = a\na->.b\n");
/// let mut diagnostics = Diagnostics::new();
/// let program = Parser::new(&mut lines, &mut diagnostics).parse_program().unwrap();
///
/// assert_eq!(program.source_word, "a");
/// assert_eq!(program.rules.len(), 1);
/// ```
pub struct Parser<'a, L: LineSource> {
    lines: &'a mut L,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a, L: LineSource> Parser<'a, L> {
    pub fn new(lines: &'a mut L, sink: &'a mut dyn DiagnosticSink) -> Self {
        Parser { lines, sink }
    }

    /// Parse all three blocks in order. The first failing block aborts the load.
    pub fn parse_program(mut self) -> Result<Program, LoadError> {
        let mut alphabet = self.parse_alphabet()?;
        let source_word = self.parse_source_word(&mut alphabet)?;
        let rules = self.parse_rules(&alphabet)?;

        tracing::debug!(
            symbols = alphabet.len(),
            word = %source_word,
            rules = rules.len(),
            "program loaded"
        );
        Ok(Program { alphabet, source_word, rules })
    }

    /// Advance to the next line that is neither blank nor a `//` comment and
    /// return its number with a cursor placed on its first significant column.
    fn next_significant(&mut self) -> Option<(usize, LineCursor)> {
        while let Some(line) = self.lines.next_line() {
            if is_insignificant(&line) {
                continue;
            }
            let mut cursor = LineCursor::new(&line);
            cursor.skip_blanks();
            return Some((self.lines.line_number(), cursor));
        }
        None
    }

    /// Turn a failed line source into a load error.
    fn ensure_readable(&mut self) -> Result<(), LoadError> {
        if self.lines.is_ok() {
            return Ok(());
        }
        let source = self.lines.take_error().unwrap_or_else(|| io::Error::other("line source failed"));
        Err(LoadError::Unreadable { line: self.lines.line_number(), source })
    }

    fn report_syntax(&mut self, line: usize, syntax: Syntax) {
        self.sink.report(Diagnostic::error(line, syntax.column, syntax.message));
    }

    fn warn(&mut self, line: usize, column: Option<usize>, message: impl Into<String>) {
        self.sink.report(Diagnostic::warning(line, column, message));
    }
}

/// Blank, whitespace-only and `//` comment lines carry no content.
fn is_insignificant(line: &str) -> bool {
    regex!(r"^[ \t]*(?://.*)?$").is_match(line)
}

/// Consume `expected` or explain what was found instead.
fn expect(cursor: &mut LineCursor, expected: char, context: &str) -> Result<(), Syntax> {
    match cursor.peek() {
        Some(c) if c == expected => {
            cursor.bump();
            Ok(())
        }
        Some(c) => Err(Syntax::new(
            cursor.column(),
            format!("invalid symbol \"{c}\" detected; \"{expected}\" is expected{context}"),
        )),
        None => Err(Syntax::new(
            cursor.column(),
            format!("unexpected end of line; \"{expected}\" is expected{context}"),
        )),
    }
}

/// Consume the block keyword (`T`/`t`, `V`/`v`).
fn expect_keyword(cursor: &mut LineCursor, keyword: char, block: &str) -> Result<(), Syntax> {
    match cursor.peek() {
        Some(c) if c.eq_ignore_ascii_case(&keyword) => {
            cursor.bump();
            Ok(())
        }
        _ => {
            let found = cursor.peek().map(String::from).unwrap_or_default();
            Err(Syntax::new(
                cursor.column(),
                format!(
                    "invalid symbol \"{found}\" detected; \"{}\" or \"{}\" is expected to start {block}",
                    keyword.to_ascii_uppercase(),
                    keyword.to_ascii_lowercase()
                ),
            ))
        }
    }
}
