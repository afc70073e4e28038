//! Run metrics.
//!
//! Timings are collected by the [`run_file`](crate::run_file) /
//! [`run_str`](crate::run_str) facade and shown in the CLI timing line.

use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunMetrics {
    /// Total elapsed time for load + execute.
    pub total: Duration,
    /// Time spent reading and parsing the program.
    pub load: Duration,
    /// Time spent rewriting.
    pub execute: Duration,
}
