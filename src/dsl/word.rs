//! Source word block: `V = word`, optionally followed by a `//` comment.

use super::{LineCursor, LineSource, Parser, Syntax, expect, expect_keyword};
use crate::{Alphabet, LoadError};

impl<L: LineSource> Parser<'_, L> {
    /// Parse the source word from the next significant line.
    ///
    /// The boundary symbols are added to `alphabet` first so they are always
    /// accepted. Symbols missing from the alphabet and an empty word are only
    /// warnings.
    pub fn parse_source_word(&mut self, alphabet: &mut Alphabet) -> Result<String, LoadError> {
        alphabet.insert_boundaries();

        let mut word = String::new();
        let mut declared_at = None;

        if let Some((line, mut cursor)) = self.next_significant() {
            declared_at = Some(line);
            if let Err(syntax) = self.word_line(line, &mut cursor, alphabet, &mut word) {
                self.report_syntax(line, syntax);
                tracing::debug!(line, "source word block failed");
                return Err(LoadError::SourceWord { line });
            }
        }
        self.ensure_readable()?;

        if word.is_empty() {
            let line = declared_at.unwrap_or_else(|| self.lines.line_number());
            self.warn(line, None, "source word is empty");
        }
        tracing::debug!(word = %word, "source word loaded");
        Ok(word)
    }

    fn word_line(
        &mut self,
        line: usize,
        cursor: &mut LineCursor,
        alphabet: &Alphabet,
        word: &mut String,
    ) -> Result<(), Syntax> {
        expect_keyword(cursor, 'v', "the source word")?;
        cursor.skip_blanks();
        expect(cursor, '=', "")?;
        cursor.skip_blanks();

        while let Some(symbol) = cursor.peek() {
            if symbol == '/' && cursor.peek_nth(1) == Some('/') {
                break;
            }
            let column = cursor.column();
            cursor.bump();
            if symbol == '\t' {
                continue;
            }
            if !alphabet.contains(symbol) {
                self.warn(line, Some(column), format!("symbol \"{symbol}\" is absent in the loaded alphabet"));
            }
            word.push(symbol);
        }
        Ok(())
    }
}
