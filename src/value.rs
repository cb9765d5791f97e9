use std::{cmp::Ordering, collections::HashMap};

use rust_decimal::{Decimal, prelude::FromPrimitive};

/// One record of the dataset: a mapping from field names to values.
pub type Document = HashMap<String, Value>;

/// A decoded JSON value, used both for filter expressions and for document
/// fields.
///
/// Integers and floats are kept apart the way the JSON decoder reports them,
/// but they compare as plain numbers: `Integer(30)` equals `Float(30.0)`.
///
/// # Examples
///
/// ```
/// use findql::Value;
/// use std::collections::HashMap;
///
/// let age = Value::Integer(30);
/// assert!(age.deep_eq(&Value::Float(30.0)));
///
/// let mut obj = HashMap::new();
/// obj.insert("$gt".to_string(), Value::Integer(25));
/// let condition = Value::Object(obj);
/// assert!(condition.is_operator_object());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null, also what a missing document field reads as
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Ordered array of values
    Array(Vec<Value>),

    /// Object with string keys; key order is not significant
    Object(HashMap<String, Value>),
}

impl Value {
    /// Human-readable name of the JSON type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Exact decimal form of a number. `None` for non-numbers and for floats
    /// outside the decimal range (NaN, infinities, huge magnitudes).
    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(n) => Some(Decimal::from(*n)),
            Value::Float(n) => Decimal::from_f64(*n),
            _ => None,
        }
    }

    /// True if this is an object with at least one `$`-prefixed key, i.e. a
    /// set of operator conditions rather than a literal to compare against.
    pub fn is_operator_object(&self) -> bool {
        match self {
            Value::Object(obj) => obj.keys().any(|k| k.starts_with('$')),
            _ => false,
        }
    }

    /// Unwraps an object into a [`Document`]. Any other value yields `None`.
    pub fn into_document(self) -> Option<Document> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Orders two numbers by value. Returns `None` when either side is not a
    /// number or the pair is unordered (NaN).
    pub fn compare_numbers(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            _ if self.is_number() && other.is_number() => {
                match (self.as_decimal(), other.as_decimal()) {
                    (Some(a), Some(b)) => Some(a.cmp(&b)),
                    // Out of decimal range: fall back to IEEE ordering
                    _ => self.as_float()?.partial_cmp(&other.as_float()?),
                }
            }
            _ => None,
        }
    }

    /// Structural equality where numbers compare by value across integer and
    /// float, arrays element-wise and objects by key set.
    pub fn deep_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.deep_eq(w)))
            }
            _ if self.is_number() && other.is_number() => {
                self.compare_numbers(other) == Some(Ordering::Equal)
            }
            _ => self == other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(pairs: &[(&str, Value)]) -> Value {
        Value::Object(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn integers_and_floats_are_equal_by_value() {
        assert!(Value::Integer(30).deep_eq(&Value::Float(30.0)));
        assert!(!Value::Integer(30).deep_eq(&Value::Float(30.5)));
        assert!(Value::Float(0.1).deep_eq(&Value::Float(0.1)));
    }

    #[test]
    fn large_integer_compares_exactly_against_float() {
        // i64::MAX is not representable as f64; a lossy cast would call these equal
        let big = Value::Integer(i64::MAX);
        let float = Value::Float(i64::MAX as f64);
        assert!(!big.deep_eq(&float));
    }

    #[test]
    fn non_numbers_do_not_order() {
        assert_eq!(
            Value::String("a".into()).compare_numbers(&Value::Integer(1)),
            None
        );
        assert_eq!(Value::Null.compare_numbers(&Value::Null), None);
        assert_eq!(
            Value::Float(f64::NAN).compare_numbers(&Value::Integer(1)),
            None
        );
    }

    #[test]
    fn mixed_number_ordering() {
        assert_eq!(
            Value::Integer(2).compare_numbers(&Value::Float(1.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::Float(-0.5).compare_numbers(&Value::Integer(0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Float(f64::INFINITY).compare_numbers(&Value::Integer(i64::MAX)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn objects_compare_without_key_order() {
        let a = obj(&[("x", Value::Integer(1)), ("y", Value::Boolean(true))]);
        let b = obj(&[("y", Value::Boolean(true)), ("x", Value::Float(1.0))]);
        assert!(a.deep_eq(&b));

        let c = obj(&[("x", Value::Integer(1))]);
        assert!(!a.deep_eq(&c));
    }

    #[test]
    fn arrays_compare_in_order() {
        let a = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
        let b = Value::Array(vec![Value::Integer(2), Value::Integer(1)]);
        assert!(!a.deep_eq(&b));
        assert!(a.deep_eq(&a.clone()));
    }

    #[test]
    fn operator_object_detection() {
        assert!(obj(&[("$gt", Value::Integer(1))]).is_operator_object());
        assert!(obj(&[("$gt", Value::Integer(1)), ("x", Value::Null)]).is_operator_object());
        assert!(!obj(&[("x", Value::Null)]).is_operator_object());
        assert!(!obj(&[]).is_operator_object());
        assert!(!Value::String("$gt".into()).is_operator_object());
    }
}
