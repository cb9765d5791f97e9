//! Execute findql queries against JSON input

use super::CliError;
use crate::{Document, EvalOptions, Interpreter, Value, output::documents_to_json, parse_query};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to execute
    pub query: String,
    /// Dataset as a JSON array of objects
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
    /// Nesting limit for logical operators
    pub max_depth: Option<usize>,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query executed successfully; the matching documents as a JSON array
    Success(serde_json::Value),
}

/// Decodes a JSON array of objects into a dataset.
pub fn load_dataset(json: &str) -> Result<Vec<Document>, CliError> {
    let value = Value::from(serde_json::from_str::<serde_json::Value>(json)?);

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(CliError::DatasetNotArray {
                found: other.type_name(),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let found = item.type_name();
            item.into_document()
                .ok_or(CliError::InvalidDocument { index, found })
        })
        .collect()
}

/// Execute a findql check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = parse_query(&options.query).map_err(CliError::Query)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let dataset = load_dataset(json_str)?;

    let interpreter = Interpreter::with_options(EvalOptions {
        max_depth: options.max_depth,
    });
    let found = interpreter
        .evaluate(&query, &dataset)
        .map_err(|e| CliError::Query(e.into()))?;

    Ok(CheckResult::Success(documents_to_json(&found)))
}
