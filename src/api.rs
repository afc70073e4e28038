use crate::dsl::{BufLines, LineSource, Parser};
use crate::engine::{Execution, Halt, Machine, RunMetrics};
use crate::{DiagnosticSink, Error, LoadError, Program, RuleSet};
use std::path::Path;
use std::time::Instant;

/// Options that affect execution.
///
/// The defaults reproduce the classic behavior: no step limit, so a rule set
/// that never stops matching never halts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Stop after this many rule applications if the algorithm is still running.
    pub max_steps: Option<usize>,
}

impl Options {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

/// Result of [`run_file`] and [`run_str`].
#[derive(Debug, Clone)]
pub struct Run {
    /// Word as loaded, before any rewriting.
    pub source_word: String,
    pub rules: RuleSet,
    pub execution: Execution,
    pub metrics: RunMetrics,
}

impl Run {
    /// The final word, or [`Error::StepLimit`] when the run was cut short.
    pub fn final_word(&self) -> Result<&str, Error> {
        match self.execution.halt {
            Halt::StepLimit { limit } => Err(Error::StepLimit { limit }),
            Halt::Terminal { .. } | Halt::NoMatch => Ok(&self.execution.word),
        }
    }
}

/// Load a program from any [`LineSource`].
pub fn load_lines<L: LineSource>(lines: &mut L, sink: &mut dyn DiagnosticSink) -> Result<Program, LoadError> {
    Parser::new(lines, sink).parse_program()
}

/// Load a program from in-memory text.
pub fn load_str(text: &str, sink: &mut dyn DiagnosticSink) -> Result<Program, LoadError> {
    load_lines(&mut BufLines::from_text(text), sink)
}

/// Load a program from a file.
pub fn load_file(path: impl AsRef<Path>, sink: &mut dyn DiagnosticSink) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let mut lines =
        BufLines::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "loading program");
    load_lines(&mut lines, sink)
}

/// Run a loaded program to completion.
pub fn execute(program: Program, options: &Options) -> Execution {
    Machine::new(program.rules, program.source_word).with_step_limit(options.max_steps).run()
}

/// Load and execute a program from a file.
///
/// Diagnostics go to `sink` whether or not loading succeeds. Execution only
/// happens when loading succeeded.
pub fn run_file(path: impl AsRef<Path>, options: &Options, sink: &mut dyn DiagnosticSink) -> Result<Run, Error> {
    let start = Instant::now();
    let program = load_file(path, sink)?;
    Ok(run_loaded(program, options, start))
}

/// Load and execute a program from in-memory text.
pub fn run_str(text: &str, options: &Options, sink: &mut dyn DiagnosticSink) -> Result<Run, Error> {
    let start = Instant::now();
    let program = load_str(text, sink)?;
    Ok(run_loaded(program, options, start))
}

fn run_loaded(program: Program, options: &Options, start: Instant) -> Run {
    let load = start.elapsed();
    let source_word = program.source_word.clone();
    let rules = program.rules.clone();

    let execute_start = Instant::now();
    let execution = execute(program, options);
    let execute = execute_start.elapsed();

    tracing::debug!(steps = execution.steps(), halt = ?execution.halt, "execution finished");
    Run { source_word, rules, execution, metrics: RunMetrics { total: start.elapsed(), load, execute } }
}
