//! JSON rendering of values and query results.
//!
//! Object keys come out sorted, so equal values always print identically.
//!
//! # Examples
//!
//! ```
//! use findql::Value;
//! use findql::output::{to_json, to_json_pretty};
//!
//! let value = Value::Array(vec![Value::Integer(1), Value::Null]);
//!
//! assert_eq!(to_json(&value), "[1,null]");
//! assert_eq!(to_json_pretty(&value), "[\n  1,\n  null\n]");
//! ```

use crate::value::{Document, Value};

/// Compact JSON.
pub fn to_json(value: &Value) -> String {
    serde_json::Value::from(value.clone()).to_string()
}

/// JSON with 2-space indentation.
pub fn to_json_pretty(value: &Value) -> String {
    format!("{:#}", serde_json::Value::from(value.clone()))
}

/// A query result as a JSON array of objects.
pub fn documents_to_json(documents: &[&Document]) -> serde_json::Value {
    serde_json::Value::Array(
        documents
            .iter()
            .map(|doc| serde_json::Value::from(Value::Object((*doc).clone())))
            .collect(),
    )
}
