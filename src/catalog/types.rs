//! Data types for RelDB
//!
//! This module defines the column types a table schema may declare.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 64-bit integer
    Int,
    /// Text of any length
    Varchar,
    /// Double-precision floating point
    Float,
    /// Boolean
    Boolean,
    /// Timestamp, stored exactly as given
    Timestamp,
}

impl DataType {
    /// Map a type keyword from a column definition.
    ///
    /// Unknown keywords fall back to `Varchar`.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_uppercase().as_str() {
            "INT" | "INTEGER" => DataType::Int,
            "VARCHAR" | "TEXT" => DataType::Varchar,
            "FLOAT" => DataType::Float,
            "BOOLEAN" => DataType::Boolean,
            "TIMESTAMP" => DataType::Timestamp,
            _ => DataType::Varchar,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "int"),
            DataType::Varchar => write!(f, "varchar"),
            DataType::Float => write!(f, "float"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Timestamp => write!(f, "timestamp"),
        }
    }
}
