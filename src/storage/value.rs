//! Value and Row types for RelDB
//!
//! This module defines how data values are represented in memory.

use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A row: column name to value, in insertion order
pub type Row = IndexMap<String, Value>;

/// A conjunctive equality predicate: every column must equal its value
pub type Predicate = IndexMap<String, Value>;

/// A value in the database
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value (64-bit)
    Integer(i64),
    /// Float value (64-bit)
    Float(f64),
    /// Text value
    Text(String),
}

/// Normalize a float so that equal numbers share one bit pattern.
fn canonical_bits(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

// Integers and floats compare numerically so that `WHERE price = 5`
// matches a stored 5.0. Hash below must agree.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                *a as f64 == *b
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0u8.hash(state),
            Value::Boolean(v) => {
                1u8.hash(state);
                v.hash(state);
            }
            Value::Integer(v) => {
                2u8.hash(state);
                canonical_bits(*v as f64).hash(state);
            }
            Value::Float(v) => {
                2u8.hash(state);
                canonical_bits(*v).hash(state);
            }
            Value::Text(v) => {
                3u8.hash(state);
                v.hash(state);
            }
        }
    }
}

impl Value {
    /// Check if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to convert to i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to convert to string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
        }
    }

    /// Rank used to order values of different kinds
    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0, // NULL sorts before everything
            Value::Boolean(_) => 1,
            Value::Integer(_) | Value::Float(_) => 2,
            Value::Text(_) => 3,
        }
    }

    /// Total order used by ORDER BY.
    ///
    /// Values of different kinds order by kind: NULL, booleans, numbers, text.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.total_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    /// Render the value as a statement literal that parses back to itself
    pub fn to_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Boolean(true) => "TRUE".to_string(),
            Value::Boolean(false) => "FALSE".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                let s = f.to_string();
                if f.is_finite() && !s.contains('.') {
                    format!("{}.0", s)
                } else {
                    s
                }
            }
            Value::Text(s) if s.contains('\'') => format!("\"{}\"", s),
            Value::Text(s) => format!("'{}'", s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_value_ordering() {
        assert_eq!(
            Value::Integer(5).sort_cmp(&Value::Integer(3)),
            Ordering::Greater
        );
        assert_eq!(
            Value::Text("abc".to_string()).sort_cmp(&Value::Text("def".to_string())),
            Ordering::Less
        );
        assert_eq!(Value::Null.sort_cmp(&Value::Integer(1)), Ordering::Less);
        assert_eq!(Value::Integer(2).sort_cmp(&Value::Float(1.5)), Ordering::Greater);
        assert_eq!(Value::Text("a".into()).sort_cmp(&Value::Integer(1)), Ordering::Greater);
    }

    #[test]
    fn test_numeric_equality_and_hash() {
        assert_eq!(Value::Integer(5), Value::Float(5.0));
        assert_ne!(Value::Integer(5), Value::Float(5.5));
        assert_ne!(Value::Integer(1), Value::Boolean(true));
        assert_ne!(Value::Text("1".into()), Value::Integer(1));
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));

        let mut set = HashSet::new();
        set.insert(Value::Integer(5));
        assert!(set.contains(&Value::Float(5.0)));
        assert!(!set.contains(&Value::Text("5".into())));
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(Value::Float(2.0).to_literal(), "2.0");
        assert_eq!(Value::Float(2.5).to_literal(), "2.5");
        assert_eq!(Value::Text("it's".into()).to_literal(), "\"it's\"");
        assert_eq!(Value::Text("ann".into()).to_literal(), "'ann'");
        assert_eq!(Value::Null.to_literal(), "NULL");
        assert_eq!(Value::Boolean(false).to_literal(), "FALSE");
    }

    #[test]
    fn test_json_shape() {
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Integer(1));
        row.insert("name".to_string(), Value::Text("Ann".into()));
        row.insert("note".to_string(), Value::Null);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Ann","note":null}"#);
    }
}
