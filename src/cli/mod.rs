//! CLI support for findql
//!
//! The functions behind the `findql` binary, usable from other tools that
//! want the same behavior without spawning a process.

mod check;
mod demo;

pub use check::{CheckOptions, CheckResult, execute_check, load_dataset};
pub use demo::{SAMPLE_QUERY, run_demo, sample_dataset};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Tokenizing, parsing or evaluating the query failed
    #[error(transparent)]
    Query(#[from] crate::Error),

    /// The dataset is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe a JSON array to stdin.")]
    NoInput,

    #[error("Dataset must be a JSON array of objects, found {found}")]
    DatasetNotArray { found: &'static str },

    #[error("Dataset entry {index} must be an object, found {found}")]
    InvalidDocument { index: usize, found: &'static str },
}
