//! Rule block: every remaining significant line is one rule.
//!
//! ```text
//! pattern->replacement        ordinary rule
//! pattern->.replacement       terminal rule
//! pattern->replacement; note  `;` or `//` ends the replacement
//! ```
//!
//! The pattern runs from the first significant column to the first `->`.
//! Tabs are dropped from both sides; spaces are kept as symbols.

use super::{LineCursor, LineSource, Parser, Syntax};
use crate::{Alphabet, LoadError, Rule, RuleSet};

impl<L: LineSource> Parser<'_, L> {
    /// Parse rules until the line source is exhausted.
    ///
    /// Invalid lines are reported and skipped so that every error in the block
    /// is surfaced, but any of them makes the block fail.
    pub fn parse_rules(&mut self, alphabet: &Alphabet) -> Result<RuleSet, LoadError> {
        let mut rules = Vec::new();
        let mut invalid = 0;

        while let Some((line, cursor)) = self.next_significant() {
            match self.rule_line(line, &cursor, alphabet) {
                Ok(rule) => {
                    tracing::trace!(line, index = rules.len(), rule = %rule, "rule loaded");
                    rules.push(rule);
                }
                Err(syntax) => {
                    self.report_syntax(line, syntax);
                    invalid += 1;
                }
            }
        }
        self.ensure_readable()?;

        if invalid > 0 {
            tracing::debug!(invalid, "rule block failed");
            return Err(LoadError::Rules { count: invalid });
        }
        let rules = RuleSet::new(rules).ok_or(LoadError::NoRules)?;
        tracing::debug!(rules = rules.len(), "rules loaded");
        Ok(rules)
    }

    fn rule_line(&mut self, line: usize, cursor: &LineCursor, alphabet: &Alphabet) -> Result<Rule, Syntax> {
        let text = cursor.rest();
        let first_column = cursor.column();

        let Some(arrow) = regex!(r"->\.?").find(&text) else {
            let end = first_column + text.chars().count();
            return Err(Syntax::new(end, "unexpected end of line; \"->\" is expected in a rule"));
        };
        let arrow_column = first_column + text[..arrow.start()].chars().count();

        let mut pattern = String::new();
        for (offset, symbol) in text[..arrow.start()].chars().enumerate() {
            if symbol == '\t' {
                continue;
            }
            if !alphabet.contains(symbol) {
                self.warn(
                    line,
                    Some(first_column + offset),
                    format!("symbol \"{symbol}\" is absent in the loaded alphabet"),
                );
            }
            pattern.push(symbol);
        }
        if pattern.is_empty() {
            return Err(Syntax::new(arrow_column, "rule has an empty pattern"));
        }

        let tail = &text[arrow.end()..];
        let end = regex!(r";|//").find(tail).map_or(tail.len(), |m| m.start());
        let replacement: String = tail[..end].chars().filter(|&c| c != '\t').collect();

        Ok(Rule { pattern, replacement, terminal: arrow.as_str().ends_with('.') })
    }
}
