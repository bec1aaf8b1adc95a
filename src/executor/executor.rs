//! Query Executor for RelDB
//!
//! This module dispatches query descriptors to the catalog and shapes the
//! results.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::sql::ast::*;
use crate::storage::Row;

/// Query result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    /// Status line of a statement that returns no rows
    Status(String),
    /// Rows of a SELECT, in result order
    Rows(Vec<Row>),
}

impl QueryResult {
    /// Create a result with a message
    pub fn with_message(message: impl Into<String>) -> Self {
        QueryResult::Status(message.into())
    }

    /// Get the status message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            QueryResult::Status(message) => Some(message),
            QueryResult::Rows(_) => None,
        }
    }

    /// Get the result rows, if any
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            QueryResult::Rows(rows) => Some(rows),
            QueryResult::Status(_) => None,
        }
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Status(message) => write!(f, "{}", message),
            QueryResult::Rows(rows) => write!(f, "{} row(s) returned", rows.len()),
        }
    }
}

/// Executor
///
/// Each descriptor maps to exactly one catalog operation. Catalog errors are
/// returned unchanged.
#[derive(Debug)]
pub struct Executor {
    catalog: Catalog,
}

impl Executor {
    /// Create an executor over a catalog
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Get the catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the catalog mutably
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Take the catalog back, e.g. to close it
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Execute a query descriptor
    pub fn execute(&mut self, query: QueryDescriptor) -> Result<QueryResult> {
        debug!(kind = query.kind(), table = query.table_name(), "executing query");

        match query {
            QueryDescriptor::CreateTable(q) => self.execute_create_table(q),
            QueryDescriptor::Insert(q) => self.execute_insert(q),
            QueryDescriptor::Select(q) => self.execute_select(q),
            QueryDescriptor::Update(q) => self.execute_update(q),
            QueryDescriptor::Delete(q) => self.execute_delete(q),
            QueryDescriptor::DropTable(q) => self.execute_drop_table(q),
        }
    }

    fn execute_create_table(&mut self, query: CreateTableQuery) -> Result<QueryResult> {
        self.catalog.create_table(
            &query.table_name,
            query.columns,
            query.primary_key,
            query.unique_keys,
        )?;

        Ok(QueryResult::with_message(format!(
            "Table '{}' created successfully",
            query.table_name
        )))
    }

    fn execute_insert(&mut self, query: InsertQuery) -> Result<QueryResult> {
        let id = self.catalog.insert(&query.table_name, query.data)?;
        Ok(QueryResult::with_message(format!(
            "Row inserted with ID: {}",
            id
        )))
    }

    fn execute_select(&mut self, query: SelectQuery) -> Result<QueryResult> {
        let rows = match &query.join {
            Some(join) => self.catalog.select_join(
                &query.table_name,
                join,
                query.columns.as_deref(),
                query.conditions.as_ref(),
                query.order_by.as_ref(),
                query.limit,
            )?,
            None => self.catalog.select(
                &query.table_name,
                query.columns.as_deref(),
                query.conditions.as_ref(),
                query.order_by.as_ref(),
                query.limit,
            )?,
        };

        debug!(table = %query.table_name, rows = rows.len(), "select finished");
        Ok(QueryResult::Rows(rows))
    }

    fn execute_update(&mut self, query: UpdateQuery) -> Result<QueryResult> {
        let count = self.catalog.update(
            &query.table_name,
            &query.updates,
            query.conditions.as_ref(),
        )?;
        Ok(QueryResult::with_message(format!("{} row(s) updated", count)))
    }

    fn execute_delete(&mut self, query: DeleteQuery) -> Result<QueryResult> {
        let count = self
            .catalog
            .delete(&query.table_name, query.conditions.as_ref())?;
        Ok(QueryResult::with_message(format!("{} row(s) deleted", count)))
    }

    fn execute_drop_table(&mut self, query: DropTableQuery) -> Result<QueryResult> {
        let message = if self.catalog.drop_table(&query.table_name)? {
            format!("Table '{}' dropped", query.table_name)
        } else {
            format!("Table '{}' not found", query.table_name)
        };
        Ok(QueryResult::with_message(message))
    }
}
