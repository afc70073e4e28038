//! Rewrite engine.
//!
//! The engine executes a [`RuleSet`](crate::RuleSet) against a working word:
//!
//! ```text
//!            ┌────────────────────────────────────────────┐
//!            ▼                                            │ non-terminal
//! scan rules 0..N ── first rule whose pattern occurs ──► rewrite leftmost match
//!            │                                            │ + keep `!…@` boundaries
//!            │ none matched                               │ terminal
//!            ▼                                            ▼
//!     Halted(NoMatch)                          Halted(Terminal { rule })
//! ```
//!
//! Every successful application is recorded as a [`Step`]. After a
//! non-terminal rule fires the scan always restarts from rule 0, so a lower
//! priority rule only ever runs when no higher priority pattern occurs in the
//! word.
//!
//! There is no cycle detection: a rule set that keeps matching runs forever
//! unless a step limit is set with [`Machine::with_step_limit`].
//!
//! ## Responsibilities by module
//!
//! - `machine.rs`: the [`Machine`] state machine and the rewrite itself.
//! - `trace.rs`: [`Step`] and [`Execution`], the recorded outcome.
//! - `metrics.rs`: timings of a load + execute run.

#[path = "engine/machine.rs"]
mod machine;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/trace.rs"]
mod trace;

pub use machine::{Halt, Machine, State};
pub use metrics::RunMetrics;
pub use trace::{Execution, Step};
