//! Character cursor over a single source line.
//!
//! Positions are character indices (not bytes) so reported columns match what
//! an editor shows for non-ASCII symbols. Columns are 1-based.

#[derive(Debug, Clone)]
pub(crate) struct LineCursor {
    chars: Vec<char>,
    pos: usize,
}

impl LineCursor {
    pub fn new(line: &str) -> Self {
        LineCursor { chars: line.chars().collect(), pos: 0 }
    }

    /// 1-based column of the next character (one past the end at end of line).
    pub fn column(&self) -> usize {
        self.pos + 1
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Look `n` characters past the next one.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Skip spaces and tabs.
    pub fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
    }

    /// The unread remainder of the line.
    pub fn rest(&self) -> String {
        self.chars[self.pos.min(self.chars.len())..].iter().collect()
    }
}
