//! Instance reader and solution writer.
//!
//! - [`parse_instance`] / [`read_instance_file`]: the instance text format
//! - [`format_solution`] / [`write_solution_file`]: the `.out` result format
//! - [`SolutionSummary`]: machine-readable run summary

mod reader;
mod writer;

pub use reader::{parse_instance, read_instance_file};
pub use writer::{format_solution, write_solution_file, SolutionSummary};

use std::path::PathBuf;

use thiserror::Error;

use crate::models::InstanceError;

/// Failure to read an instance.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid {expected} {token:?} at token {position}")]
    InvalidToken {
        expected: &'static str,
        token: String,
        position: usize,
    },

    #[error("unknown node kind {code} at token {position}")]
    UnknownKind { code: i64, position: usize },

    #[error("demand given for unknown node id {0}")]
    UnknownDemandId(i64),

    #[error("demand given twice for node id {0}")]
    DuplicateDemand(i64),

    #[error("{what} must be an integer, got {value}")]
    NonIntegral { what: &'static str, value: f64 },

    #[error(transparent)]
    Instance(#[from] InstanceError),
}
