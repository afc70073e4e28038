//! The rewrite state machine.

use super::{Execution, Step};
use crate::{BEGIN_BOUNDARY, DELETION_SENTINEL, END_BOUNDARY, Rule, RuleSet};

/// Why a machine stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// A terminal rule fired.
    Terminal { rule: usize },
    /// A full scan found no rule whose pattern occurs in the word.
    NoMatch,
    /// The configured step limit was reached while a rule still applied.
    StepLimit { limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted(Halt),
}

/// Exclusive owner of the rule set and the working word.
///
/// Usage: build with [`Machine::new`] and either call [`Machine::run`] or
/// drive it manually with [`Machine::step`].
///
/// ```
/// use markov_algo::{Halt, Machine, Rule, RuleSet};
///
/// let rules = RuleSet::new(vec![Rule::new("ab", "x"), Rule::new("a", "y")]).unwrap();
/// let execution = Machine::new(rules, "aab".to_string()).run();
///
/// assert_eq!(execution.word, "!yx@");
/// assert_eq!(execution.halt, Halt::NoMatch);
/// ```
#[derive(Debug)]
pub struct Machine {
    rules: RuleSet,
    word: String,
    state: State,
    trace: Vec<Step>,
    limit: Option<usize>,
}

impl Machine {
    pub fn new(rules: RuleSet, word: String) -> Self {
        Machine { rules, word, state: State::Running, trace: Vec::new(), limit: None }
    }

    /// Halt with [`Halt::StepLimit`] instead of applying rule number `limit + 1`.
    /// `None` (the default) never stops a run that keeps matching.
    pub fn with_step_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn trace(&self) -> &[Step] {
        &self.trace
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Apply the highest priority rule whose pattern occurs in the word.
    ///
    /// Every call starts scanning from rule 0. Returns the recorded step, or
    /// `None` once the machine is halted (the call that discovers the halt
    /// also returns `None`).
    pub fn step(&mut self) -> Option<&Step> {
        if self.state != State::Running {
            return None;
        }

        let Some((index, at)) = self.find_applicable() else {
            tracing::debug!(steps = self.trace.len(), word = %self.word, "no rule applies; halting");
            enforce_boundaries(&mut self.word);
            self.state = State::Halted(Halt::NoMatch);
            return None;
        };

        if let Some(limit) = self.limit {
            if self.trace.len() >= limit {
                tracing::warn!(limit, word = %self.word, "step limit reached; halting");
                enforce_boundaries(&mut self.word);
                self.state = State::Halted(Halt::StepLimit { limit });
                return None;
            }
        }

        let rule = self.rules.get(index)?;
        rewrite(&mut self.word, rule, at);

        let number = self.trace.len() + 1;
        tracing::trace!(number, rule = index, word = %self.word, "rule applied");
        if rule.terminal {
            tracing::debug!(steps = number, rule = index, "terminal rule applied; halting");
            self.state = State::Halted(Halt::Terminal { rule: index });
        }

        self.trace.push(Step { number, rule: index, word: self.word.clone() });
        self.trace.last()
    }

    /// Step until halted and hand back the final word and trace.
    pub fn run(mut self) -> Execution {
        while self.step().is_some() {}

        let halt = match self.state {
            State::Halted(halt) => halt,
            State::Running => Halt::NoMatch,
        };
        Execution { word: self.word, trace: self.trace, halt }
    }

    /// First rule (by priority) whose pattern occurs in the word, with the
    /// byte offset of its leftmost occurrence.
    fn find_applicable(&self) -> Option<(usize, usize)> {
        self.rules.iter().enumerate().find_map(|(index, rule)| self.word.find(&rule.pattern).map(|at| (index, at)))
    }
}

/// Replace (or erase) the match of `rule` at byte offset `at`, then restore
/// the boundary symbols.
fn rewrite(word: &mut String, rule: &Rule, at: usize) {
    let matched = at..at + rule.pattern.len();
    if rule.replacement == DELETION_SENTINEL {
        word.replace_range(matched, "");
    } else {
        word.replace_range(matched, &rule.replacement);
    }
    enforce_boundaries(word);
}

/// Make sure the word starts with `!` and ends with `@`, without duplicating
/// either. An empty word becomes `!@`.
fn enforce_boundaries(word: &mut String) {
    if !word.starts_with(BEGIN_BOUNDARY) {
        word.insert(0, BEGIN_BOUNDARY);
    }
    if !word.ends_with(END_BOUNDARY) {
        word.push(END_BOUNDARY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(rules: Vec<Rule>) -> RuleSet {
        RuleSet::new(rules).unwrap()
    }

    fn applied(execution: &Execution) -> Vec<usize> {
        execution.trace.iter().map(|s| s.rule).collect()
    }

    #[test]
    fn boundaries_are_added_once() {
        let cases = [("", "!@"), ("a", "!a@"), ("!a", "!a@"), ("a@", "!a@"), ("!a@", "!a@"), ("@", "!@"), ("!", "!@")];
        for (input, expected) in cases {
            let mut word = input.to_string();
            enforce_boundaries(&mut word);
            assert_eq!(word, expected, "{input:?}");
        }
    }

    #[test]
    fn priority_wins_over_position() {
        let execution = Machine::new(rules(vec![Rule::new("ab", "x"), Rule::new("a", "y")]), "aab".into()).run();

        assert_eq!(execution.trace[0], Step { number: 1, rule: 0, word: "!ax@".into() });
        assert_eq!(execution.trace[1], Step { number: 2, rule: 1, word: "!yx@".into() });
        assert_eq!(execution.word, "!yx@");
        assert_eq!(execution.halt, Halt::NoMatch);
    }

    #[test]
    fn leftmost_occurrence_is_rewritten() {
        let execution = Machine::new(rules(vec![Rule::terminal("b", "X")]), "abab".into()).run();
        assert_eq!(execution.word, "!aXab@");
        assert_eq!(execution.halt, Halt::Terminal { rule: 0 });
    }

    #[test]
    fn scan_restarts_from_first_rule() {
        let execution =
            Machine::new(rules(vec![Rule::new("ab", "b"), Rule::new("c", "ab")]), "cc".into()).run();

        assert_eq!(applied(&execution), vec![1, 0, 1, 0]);
        let words: Vec<&str> = execution.trace.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(words, vec!["!abc@", "!bc@", "!bab@", "!bb@"]);
        assert_eq!(execution.halt, Halt::NoMatch);
    }

    #[test]
    fn growing_rule_keeps_highest_priority() {
        // `a` keeps occurring after every rewrite, so rule 0 is always chosen
        // and the terminal rule never gets a turn.
        let machine = Machine::new(rules(vec![Rule::new("a", "aa"), Rule::terminal("aa", "b")]), "a".into())
            .with_step_limit(Some(3));
        let execution = machine.run();

        assert_eq!(applied(&execution), vec![0, 0, 0]);
        assert_eq!(execution.trace[0].word, "!aa@");
        assert_eq!(execution.word, "!aaaa@");
        assert_eq!(execution.halt, Halt::StepLimit { limit: 3 });
        assert!(!execution.is_success());
    }

    #[test]
    fn terminal_rule_halts_immediately() {
        let execution =
            Machine::new(rules(vec![Rule::terminal("a", "b"), Rule::new("b", "c")]), "aa".into()).run();
        assert_eq!(execution.steps(), 1);
        assert_eq!(execution.word, "!ba@");
        assert_eq!(execution.halt, Halt::Terminal { rule: 0 });
        assert!(execution.is_success());
    }

    #[test]
    fn no_match_halts_with_bounded_word() {
        let execution = Machine::new(rules(vec![Rule::new("z", "y")]), "abc".into()).run();
        assert!(execution.trace.is_empty());
        assert_eq!(execution.word, "!abc@");
        assert_eq!(execution.halt, Halt::NoMatch);
        assert!(execution.is_success());
    }

    #[test]
    fn deletion_sentinel_erases_match() {
        let execution = Machine::new(rules(vec![Rule::terminal("bc", DELETION_SENTINEL)]), "abcd".into()).run();
        assert_eq!(execution.word, "!ad@");

        let execution = Machine::new(rules(vec![Rule::terminal("bc", "")]), "abcd".into()).run();
        assert_eq!(execution.word, "!ad@");
    }

    #[test]
    fn erasing_whole_word_leaves_boundaries() {
        let execution = Machine::new(rules(vec![Rule::new("ab", "")]), "ab".into()).run();
        assert_eq!(execution.word, "!@");
        assert_eq!(execution.halt, Halt::NoMatch);
    }

    #[test]
    fn boundary_invariant_holds_after_every_step() {
        let set = rules(vec![Rule::new("a", "@"), Rule::new("!b", "b"), Rule::new("b@", "")]);
        let machine = Machine::new(set, "ab".into()).with_step_limit(Some(20));
        let execution = machine.run();

        let words: Vec<&str> = execution.trace.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(words, vec!["!@b@", "!@"]);
        for step in &execution.trace {
            assert!(step.word.starts_with(BEGIN_BOUNDARY), "{}", step.word);
            assert!(step.word.ends_with(END_BOUNDARY), "{}", step.word);
        }
    }

    #[test]
    fn replacement_may_introduce_new_symbols() {
        let execution = Machine::new(rules(vec![Rule::terminal("a", "ζ")]), "aa".into()).run();
        assert_eq!(execution.word, "!ζa@");
    }

    #[test]
    fn manual_stepping_reports_state() {
        let mut machine = Machine::new(rules(vec![Rule::new("a", "b")]), "aa".into());
        assert_eq!(machine.state(), State::Running);

        assert_eq!(machine.step().map(|s| s.rule), Some(0));
        assert_eq!(machine.word(), "!ba@");
        assert_eq!(machine.step().map(|s| s.number), Some(2));
        assert_eq!(machine.step(), None);
        assert_eq!(machine.state(), State::Halted(Halt::NoMatch));
        assert_eq!(machine.step(), None);
        assert_eq!(machine.trace().len(), 2);
    }

    #[test]
    fn first_scan_sees_word_without_boundaries() {
        // Boundaries only appear once the machine rewrites or halts.
        let execution = Machine::new(rules(vec![Rule::new("!a", "x")]), "a".into()).run();
        assert!(execution.trace.is_empty());
        assert_eq!(execution.word, "!a@");
    }

    #[test]
    fn zero_step_limit_still_bounds_word() {
        let machine = Machine::new(rules(vec![Rule::new("a", "b")]), "a".into()).with_step_limit(Some(0));
        let execution = machine.run();
        assert!(execution.trace.is_empty());
        assert_eq!(execution.word, "!a@");
        assert_eq!(execution.halt, Halt::StepLimit { limit: 0 });
    }

    #[test]
    fn step_limit_does_not_mask_natural_halt() {
        let machine = Machine::new(rules(vec![Rule::new("a", "b")]), "a".into()).with_step_limit(Some(1));
        let execution = machine.run();
        assert_eq!(execution.steps(), 1);
        assert_eq!(execution.halt, Halt::NoMatch);
    }
}
