use std::{cmp::Ordering, collections::HashMap};

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Node, Operator, Query},
    value::{Document, Value},
};

/// A filter object: field conditions and logical operators, all of which must hold.
type Filter = HashMap<String, Value>;

/// Errors that can occur during query evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A `$` key that is not a known operator, a non-`$` key mixed into an
    /// operator object, or a comparison used where a filter is expected
    #[error("Unsupported operator '{name}'")]
    UnsupportedOperator { name: String },

    /// A logical operator whose argument has the wrong shape
    #[error("Invalid operand for '{operator}': expected {expected}")]
    InvalidOperand {
        operator: &'static str,
        expected: &'static str,
    },

    /// Logical operators nested deeper than [`EvalOptions::max_depth`]
    #[error("Filter nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep { limit: usize },
}

/// Evaluation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// How many levels of `$and`/`$or`/`$not` a filter may nest.
    /// `None` leaves nesting bounded only by the call stack.
    pub max_depth: Option<usize>,
}

impl EvalOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Evaluates parsed queries against an in-memory dataset.
///
/// The interpreter holds no state besides its options, so one instance can
/// serve any number of queries, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    options: EvalOptions,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Interpreter { options }
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Evaluates any AST node against the dataset.
    pub fn evaluate_node<'d>(
        &self,
        node: &Node,
        dataset: &'d [Document],
    ) -> Result<Vec<&'d Document>, EvalError> {
        match node {
            Node::Query(query) => self.evaluate(query, dataset),
        }
    }

    /// Returns the documents matching the query's filter, in dataset order.
    ///
    /// # Examples
    ///
    /// ```
    /// use findql::{Document, Interpreter, Value, parse_query};
    ///
    /// let dataset: Vec<Document> = vec![
    ///     [("age".to_string(), Value::Integer(30))].into_iter().collect(),
    ///     [("age".to_string(), Value::Integer(20))].into_iter().collect(),
    /// ];
    ///
    /// let query = parse_query(r#"db.people.find({"age": {"$gte": 21}})"#).unwrap();
    /// let found = Interpreter::new().evaluate(&query, &dataset).unwrap();
    /// assert_eq!(found, vec![&dataset[0]]);
    /// ```
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(collection = %query.collection, documents = dataset.len())
    )]
    pub fn evaluate<'d>(
        &self,
        query: &Query,
        dataset: &'d [Document],
    ) -> Result<Vec<&'d Document>, EvalError> {
        let mut results = Vec::new();
        for document in dataset {
            if self.matches(document, &query.filter)? {
                results.push(document);
            }
        }

        debug!(matched = results.len(), "evaluated query");
        Ok(results)
    }

    /// Same result as [`Interpreter::evaluate`], with documents tested on
    /// rayon's thread pool.
    #[cfg(feature = "parallel")]
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(collection = %query.collection, documents = dataset.len())
    )]
    pub fn evaluate_parallel<'d>(
        &self,
        query: &Query,
        dataset: &'d [Document],
    ) -> Result<Vec<&'d Document>, EvalError> {
        use rayon::prelude::*;

        // Indexed collect keeps dataset order
        let selected: Vec<Option<&'d Document>> = dataset
            .par_iter()
            .map(|document| {
                self.matches(document, &query.filter)
                    .map(|matched| matched.then_some(document))
            })
            .collect::<Result<_, _>>()?;

        let results: Vec<_> = selected.into_iter().flatten().collect();
        debug!(matched = results.len(), "evaluated query");
        Ok(results)
    }

    /// Tests one document against a filter object.
    ///
    /// Every entry is evaluated even after one fails, so a malformed filter
    /// is reported no matter how the object's keys happen to be ordered.
    pub fn matches(&self, document: &Document, filter: &Filter) -> Result<bool, EvalError> {
        self.match_filter(document, filter, 0)
    }

    fn match_filter(
        &self,
        document: &Document,
        filter: &Filter,
        depth: usize,
    ) -> Result<bool, EvalError> {
        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                return Err(EvalError::NestingTooDeep { limit });
            }
        }

        let mut all = true;
        for (key, condition) in filter {
            let matched = if key.starts_with('$') {
                let operator = parse_operator(key)?;
                if !operator.is_logical() {
                    return Err(EvalError::UnsupportedOperator { name: key.clone() });
                }
                self.apply_logical(operator, document, condition, depth)?
            } else {
                self.match_field(document, key, condition, depth)?
            };
            all &= matched;
        }
        Ok(all)
    }

    fn match_field(
        &self,
        document: &Document,
        field: &str,
        condition: &Value,
        depth: usize,
    ) -> Result<bool, EvalError> {
        let value = document.get(field).unwrap_or(&Value::Null);

        match condition {
            Value::Object(operators) if condition.is_operator_object() => {
                let mut all = true;
                for (name, arg) in operators {
                    all &= self.apply_operator(name, document, value, arg, depth)?;
                }
                Ok(all)
            }
            // Literal object, scalar, array, null
            _ => Ok(value.deep_eq(condition)),
        }
    }

    fn apply_operator(
        &self,
        name: &str,
        document: &Document,
        value: &Value,
        arg: &Value,
        depth: usize,
    ) -> Result<bool, EvalError> {
        let operator = parse_operator(name)?;
        let ordering = || value.compare_numbers(arg);

        let result = match operator {
            Operator::Eq => value.deep_eq(arg),
            Operator::Ne => !value.deep_eq(arg),
            Operator::Gt => ordering() == Some(Ordering::Greater),
            Operator::Gte => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
            Operator::Lt => ordering() == Some(Ordering::Less),
            Operator::Lte => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
            Operator::And | Operator::Or | Operator::Not => {
                self.apply_logical(operator, document, arg, depth)?
            }
        };
        Ok(result)
    }

    /// `$and`, `$or` and `$not` test the whole document, wherever they appear.
    fn apply_logical(
        &self,
        operator: Operator,
        document: &Document,
        arg: &Value,
        depth: usize,
    ) -> Result<bool, EvalError> {
        match operator {
            Operator::And => {
                let mut all = true;
                for sub in sub_filters(operator, arg)? {
                    all &= self.match_filter(document, sub, depth + 1)?;
                }
                Ok(all)
            }
            Operator::Or => {
                let mut any = false;
                for sub in sub_filters(operator, arg)? {
                    any |= self.match_filter(document, sub, depth + 1)?;
                }
                Ok(any)
            }
            Operator::Not => match arg {
                Value::Object(sub) => Ok(!self.match_filter(document, sub, depth + 1)?),
                _ => Err(EvalError::InvalidOperand {
                    operator: operator.name(),
                    expected: "a filter object",
                }),
            },
            // Comparisons need a field to compare
            _ => Err(EvalError::UnsupportedOperator {
                name: operator.name().to_string(),
            }),
        }
    }
}

fn parse_operator(name: &str) -> Result<Operator, EvalError> {
    name.parse().map_err(|()| EvalError::UnsupportedOperator {
        name: name.to_string(),
    })
}

fn sub_filters(operator: Operator, arg: &Value) -> Result<Vec<&Filter>, EvalError> {
    let invalid = || EvalError::InvalidOperand {
        operator: operator.name(),
        expected: "an array of filter objects",
    };

    match arg {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(sub) => Ok(sub),
                _ => Err(invalid()),
            })
            .collect(),
        _ => Err(invalid()),
    }
}
