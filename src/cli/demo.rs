//! Built-in sample data for trying the language without an input file

use serde_json::json;

use super::CliError;
use crate::{Document, Value, find, output::documents_to_json};

/// The query run by `findql demo`.
pub const SAMPLE_QUERY: &str = r#"db.collection.find({"age": {"$gt": 25}, "city": "New York"})"#;

pub fn sample_dataset() -> Vec<Document> {
    let people = json!([
        {"_id": 1, "name": "Alice", "age": 30, "city": "New York"},
        {"_id": 2, "name": "Bob", "age": 25, "city": "San Francisco"},
        {"_id": 3, "name": "Charlie", "age": 35, "city": "Los Angeles"},
        {"_id": 4, "name": "Diana", "age": 28, "city": "New York"},
        {"_id": 5, "name": "Eve", "age": 40, "city": "Chicago"},
    ]);

    match Value::from(people) {
        Value::Array(items) => items.into_iter().filter_map(Value::into_document).collect(),
        _ => Vec::new(),
    }
}

/// Runs [`SAMPLE_QUERY`] over [`sample_dataset`].
pub fn run_demo() -> Result<serde_json::Value, CliError> {
    let dataset = sample_dataset();
    let found = find(SAMPLE_QUERY, &dataset)?;
    Ok(documents_to_json(&found))
}

#[test]
fn test_demo_finds_new_yorkers_over_25() {
    let json = run_demo().unwrap();
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [1, 4]);
}
