//! Alphabet block: `T = { symbol, symbol, ... }` on a single line.
//!
//! Inside the braces `,` and tab separate symbols, `\,` and `\\` are the
//! literal comma and backslash, and every other character (space included)
//! is a symbol. Anything after the closing brace is ignored.

use super::{LineCursor, LineSource, Parser, Syntax, expect, expect_keyword};
use crate::{Alphabet, LoadError};

impl<L: LineSource> Parser<'_, L> {
    /// Parse the alphabet from the first significant line.
    ///
    /// Fails on a syntax error in that line, or when the resulting alphabet is
    /// empty (including when the input has no significant line at all).
    pub fn parse_alphabet(&mut self) -> Result<Alphabet, LoadError> {
        let mut alphabet = Alphabet::new();

        if let Some((line, mut cursor)) = self.next_significant() {
            if let Err(syntax) = self.alphabet_line(line, &mut cursor, &mut alphabet) {
                self.report_syntax(line, syntax);
                tracing::debug!(line, "alphabet block failed");
                return Err(LoadError::Alphabet { line });
            }
        }
        self.ensure_readable()?;

        if alphabet.is_empty() {
            return Err(LoadError::EmptyAlphabet);
        }
        tracing::debug!(symbols = alphabet.len(), "alphabet loaded");
        Ok(alphabet)
    }

    fn alphabet_line(&mut self, line: usize, cursor: &mut LineCursor, alphabet: &mut Alphabet) -> Result<(), Syntax> {
        expect_keyword(cursor, 't', "the alphabet")?;
        cursor.skip_blanks();
        expect(cursor, '=', "")?;
        cursor.skip_blanks();
        expect(cursor, '{', " to open the alphabet")?;
        if cursor.at_end() {
            return Err(Syntax::new(cursor.column(), "unexpected end of line; a symbol of the alphabet is expected"));
        }

        loop {
            let column = cursor.column();
            match cursor.bump() {
                None => {
                    return Err(Syntax::new(column, "unexpected end of line; \"}\" is expected to close the alphabet"));
                }
                Some('}') => return Ok(()),
                Some(',' | '\t') => {}
                Some('\\') => match cursor.peek() {
                    Some(escaped @ (',' | '\\')) => {
                        cursor.bump();
                        self.add_symbol(line, column, alphabet, escaped);
                    }
                    Some(other) => {
                        let message = format!("\"\\{other}\" is not an escape sequence; \"\\\" is ignored");
                        self.warn(line, Some(column), message);
                    }
                    None => self.warn(line, Some(column), "dangling \"\\\" at end of line is ignored"),
                },
                Some(symbol) => self.add_symbol(line, column, alphabet, symbol),
            }
        }
    }

    fn add_symbol(&mut self, line: usize, column: usize, alphabet: &mut Alphabet, symbol: char) {
        if !alphabet.insert(symbol) {
            self.warn(line, Some(column), format!("symbol \"{symbol}\" is duplicated"));
        }
    }
}
