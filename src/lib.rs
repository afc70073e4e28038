//! Interpreter for normal-form (Markov) algorithms.
//!
//! A program is a small line-oriented text file with three blocks:
//!
//! ```text
//! T = { a, b, c, \, , \\ }     alphabet (one line)
//! V = abc                      source word (one line)
//! ab->b                        rules, one per line, in priority order
//! c->.ab                       `->.` marks a terminal rule
//! ```
//!
//! Loading goes through [`dsl::Parser`], which reads lines from a
//! [`LineSource`] and reports structured [`Diagnostic`]s to a
//! [`DiagnosticSink`]. Execution goes through [`Machine`], which applies the
//! first rule whose pattern occurs in the working word (at its leftmost
//! occurrence) and restarts from the first rule after every application.
//!
//! # Example
//! ```
//! use markov_algo::{Diagnostics, Halt, Options, run_str};
//!
//! let program = "T = {a,b}\nV = aab\nab->b\n";
//! let mut diagnostics = Diagnostics::new();
//! let run = run_str(program, &Options::default(), &mut diagnostics).unwrap();
//!
//! assert_eq!(run.execution.word, "!b@");
//! assert_eq!(run.execution.halt, Halt::NoMatch);
//! ```

use std::collections::HashSet;
use std::fmt;

#[macro_use]
mod macros;
mod api;
pub mod diagnostics;
pub mod dsl;
pub mod engine;
mod error;

pub use api::{Options, Run, execute, load_file, load_lines, load_str, run_file, run_str};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, Severity};
pub use dsl::{BufLines, LineSource, Parser};
pub use engine::{Execution, Halt, Machine, RunMetrics, State, Step};
pub use error::{Error, LoadError};

/// Symbol kept at the first position of the working word after every rewrite.
pub const BEGIN_BOUNDARY: char = '!';
/// Symbol kept at the last position of the working word after every rewrite.
pub const END_BOUNDARY: char = '@';
/// Replacement text meaning "erase the matched substring".
pub const DELETION_SENTINEL: &str = "!";

// --- Alphabet ----------------------------------------------------------------

/// Set of declared symbols.
///
/// The alphabet is diagnostic only: symbols outside of it produce warnings
/// while loading, never errors, and replacement text is not checked at all.
/// Insertion order is kept so the set can be displayed the way it was declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashSet<char>,
}

impl Alphabet {
    /// Create an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `symbol`. Returns `false` if it was already present.
    pub fn insert(&mut self, symbol: char) -> bool {
        if !self.index.insert(symbol) {
            return false;
        }
        self.symbols.push(symbol);
        true
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    /// Add the reserved boundary symbols, whether or not they were declared.
    pub fn insert_boundaries(&mut self) {
        self.insert(BEGIN_BOUNDARY);
        self.insert(END_BOUNDARY);
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut alphabet = Alphabet::new();
        for symbol in iter {
            alphabet.insert(symbol);
        }
        alphabet
    }
}

// --- Rules -------------------------------------------------------------------

/// A single rewrite directive: `pattern -> replacement` or
/// `pattern ->. replacement` when `terminal` is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub pattern: String,
    pub replacement: String,
    pub terminal: bool,
}

impl Rule {
    /// A non-terminal rule.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Rule { pattern: pattern.into(), replacement: replacement.into(), terminal: false }
    }

    /// A rule that halts the machine once it fires.
    pub fn terminal(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Rule { terminal: true, ..Rule::new(pattern, replacement) }
    }

    /// A rule can be executed only when its pattern is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.pattern.is_empty()
    }

    /// Whether firing this rule removes the match without inserting text.
    pub fn erases(&self) -> bool {
        self.replacement.is_empty() || self.replacement == DELETION_SENTINEL
    }

    pub fn arrow(&self) -> &'static str {
        if self.terminal { "->." } else { "->" }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pattern, self.arrow(), self.replacement)
    }
}

/// Non-empty, priority-ordered list of valid rules. Index 0 has the highest
/// priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Returns `None` when `rules` is empty or contains an invalid rule.
    pub fn new(rules: Vec<Rule>) -> Option<Self> {
        if rules.is_empty() || !rules.iter().all(Rule::is_valid) {
            return None;
        }
        Some(RuleSet { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false`: a rule set holds at least one rule.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Everything the loader extracts from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Declared symbols plus the boundary symbols.
    pub alphabet: Alphabet,
    pub source_word: String,
    pub rules: RuleSet,
}
