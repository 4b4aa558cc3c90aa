//! Defines custom error types for the application.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two input files an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Query,
    Config,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Query => f.write_str("sql file"),
            FileKind::Config => f.write_str("configuration file"),
        }
    }
}

#[derive(Error, Debug)]
/// Error type returned when a query cannot be prepared or launched.
pub enum VarsError {
    #[error("{kind} not found: {}", .path.display())]
    FileNotFound { kind: FileKind, path: PathBuf },

    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid line {line_number} in configuration file: \"{line}\"")]
    InvalidLine { line_number: usize, line: String },

    #[error("The query requires a variable missing from the configuration file: \"{0}\"")]
    MissingVariable(String),

    #[error("Malformed placeholder at byte {offset} of the query: {reason}")]
    MalformedTemplate { offset: usize, reason: String },

    #[error("Failed to launch '{program}'")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write the query to standard output")]
    Output(#[source] io::Error),
}
