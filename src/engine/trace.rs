//! Execution trace.

use super::Halt;

/// One successful rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based position in the trace.
    pub number: usize,
    /// 0-based index of the rule that fired.
    pub rule: usize,
    /// Working word right after the rewrite.
    pub word: String,
}

/// Final state of a machine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Working word when the machine halted.
    pub word: String,
    pub trace: Vec<Step>,
    pub halt: Halt,
}

impl Execution {
    /// `true` unless the run was cut short by the step limit.
    pub fn is_success(&self) -> bool {
        !matches!(self.halt, Halt::StepLimit { .. })
    }

    pub fn steps(&self) -> usize {
        self.trace.len()
    }
}
