//! Error types.
//!
//! Loading fails per block: the failing block is named in the error, while
//! the exact locations and messages live in the diagnostics reported to the
//! [`DiagnosticSink`](crate::DiagnosticSink).

use std::io;
use std::path::PathBuf;

/// Why a program could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("can't open file \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The line source failed part-way through.
    #[error("input became unreadable after line {line}: {source}")]
    Unreadable {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("alphabet was not loaded since errors occurred (line {line})")]
    Alphabet { line: usize },

    #[error("alphabet was not loaded; the file may not contain an alphabet definition at all")]
    EmptyAlphabet,

    #[error("source word was not loaded since errors occurred (line {line})")]
    SourceWord { line: usize },

    #[error("errors occurred while loading rules ({count} invalid)")]
    Rules { count: usize },

    #[error("no rule was loaded; nothing to execute")]
    NoRules,
}

/// Errors surfaced by the [`run_file`](crate::run_file) / [`run_str`](crate::run_str) facade.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("step limit of {limit} reached before the algorithm halted")]
    StepLimit { limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_wraps_into_error() {
        let err: Error = LoadError::NoRules.into();
        assert!(matches!(err, Error::Load(LoadError::NoRules)));
        assert_eq!(err.to_string(), "no rule was loaded; nothing to execute");
    }

    #[test]
    fn io_error_names_the_path() {
        let err = LoadError::Io {
            path: PathBuf::from("missing.nam"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "can't open file \"missing.nam\": not found");
        assert!(std::error::Error::source(&err).is_some());
    }
}
