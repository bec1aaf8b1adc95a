//! Query descriptors
//!
//! The parser's output and the executor's input. Each variant carries only
//! what its catalog operation needs.

use crate::catalog::Column;
use crate::storage::{Join, OrderBy, Predicate, Row};

/// A parsed statement
#[derive(Debug, Clone, PartialEq)]
pub enum QueryDescriptor {
    /// CREATE TABLE statement
    CreateTable(CreateTableQuery),
    /// INSERT statement
    Insert(InsertQuery),
    /// SELECT statement
    Select(SelectQuery),
    /// UPDATE statement
    Update(UpdateQuery),
    /// DELETE statement
    Delete(DeleteQuery),
    /// DROP TABLE statement
    DropTable(DropTableQuery),
}

impl QueryDescriptor {
    /// Statement kind, as used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            QueryDescriptor::CreateTable(_) => "create_table",
            QueryDescriptor::Insert(_) => "insert",
            QueryDescriptor::Select(_) => "select",
            QueryDescriptor::Update(_) => "update",
            QueryDescriptor::Delete(_) => "delete",
            QueryDescriptor::DropTable(_) => "drop_table",
        }
    }

    /// Table the statement operates on
    pub fn table_name(&self) -> &str {
        match self {
            QueryDescriptor::CreateTable(q) => &q.table_name,
            QueryDescriptor::Insert(q) => &q.table_name,
            QueryDescriptor::Select(q) => &q.table_name,
            QueryDescriptor::Update(q) => &q.table_name,
            QueryDescriptor::Delete(q) => &q.table_name,
            QueryDescriptor::DropTable(q) => &q.table_name,
        }
    }
}

/// CREATE TABLE statement
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableQuery {
    pub table_name: String,
    /// Data columns in declaration order
    pub columns: Vec<Column>,
    /// From a `PRIMARY KEY(col)` definition
    pub primary_key: Option<String>,
    /// From `UNIQUE(col)` definitions
    pub unique_keys: Vec<String>,
}

/// INSERT statement
#[derive(Debug, Clone, PartialEq)]
pub struct InsertQuery {
    pub table_name: String,
    /// Column name to value, in statement order
    pub data: Row,
}

/// SELECT statement
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectQuery {
    pub table_name: String,
    /// Projection; `None` for `*`
    pub columns: Option<Vec<String>>,
    /// Conjunctive equality predicate
    pub conditions: Option<Predicate>,
    pub join: Option<Join>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

/// UPDATE statement
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    pub table_name: String,
    /// Assignments
    pub updates: Row,
    /// At most one equality
    pub conditions: Option<Predicate>,
}

/// DELETE statement
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    pub table_name: String,
    /// At most one equality
    pub conditions: Option<Predicate>,
}

/// DROP TABLE statement
#[derive(Debug, Clone, PartialEq)]
pub struct DropTableQuery {
    pub table_name: String,
}
