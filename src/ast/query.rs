use std::collections::HashMap;

use crate::value::Value;

/// A parsed `db.<collection>.find(<filter>)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Collection named after `db.`
    pub collection: String,

    /// Top-level filter object; field conditions and logical operators
    pub filter: HashMap<String, Value>,
}

/// Every kind of AST node the interpreter can evaluate.
///
/// Only `find` queries exist today; new statement forms are added as variants
/// here so that evaluation has to handle them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Query(Query),
}

impl From<Query> for Node {
    fn from(query: Query) -> Self {
        Node::Query(query)
    }
}
