//! Error types for RelDB
//!
//! This module defines all error types used throughout the engine.

use crate::catalog::DataType;
use thiserror::Error;

/// The main error type for RelDB
#[derive(Error, Debug)]
pub enum Error {
    // ========== Parser Errors ==========
    #[error("Parse error: {0}")]
    Syntax(String),

    #[error("Parse error: empty query")]
    EmptyQuery,

    #[error("Parse error: unsupported query: {0}")]
    UnsupportedQuery(String),

    // ========== Catalog Errors ==========
    #[error("Catalog error: table '{0}' not found")]
    TableNotFound(String),

    #[error("Catalog error: table '{0}' already exists")]
    TableAlreadyExists(String),

    #[error("Catalog error: column '{0}' is declared more than once in table '{1}'")]
    DuplicateColumn(String, String),

    // ========== Row Validation Errors ==========
    #[error("Type error: column '{column}' expects {expected}, got {found}")]
    ColumnTypeMismatch {
        column: String,
        expected: DataType,
        found: String,
    },

    #[error("Constraint error: duplicate value {value} for unique column '{column}'")]
    UniqueConstraintViolation { column: String, value: String },

    // ========== Storage Errors ==========
    #[error("Storage error: corrupted row blob for table '{table}': {reason}")]
    CorruptedBlob { table: String, reason: String },

    #[error("Storage error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for RelDB operations
pub type Result<T> = std::result::Result<T, Error>;
