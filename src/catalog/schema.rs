//! Schema definitions for RelDB
//!
//! This module defines column metadata and the persisted catalog record.

use super::types::DataType;
use serde::{Deserialize, Serialize};

/// Column definition in a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub data_type: DataType,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Catalog record for one table, as written to the catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    /// Ordered column list
    pub columns: Vec<Column>,
    /// Primary key column, if declared
    pub primary_key: Option<String>,
    /// Columns carrying a UNIQUE constraint
    pub unique_keys: Vec<String>,
    /// Number of rows at the time of the last write
    pub row_count: usize,
}

impl TableMeta {
    /// Get column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Render the table layout for `desc`-style commands
    pub fn describe(&self, table_name: &str) -> String {
        let mut info = format!("Table: {}\n", table_name);
        info.push_str("Columns:\n");

        for col in &self.columns {
            let mut flags = Vec::new();
            if self.primary_key.as_deref() == Some(col.name.as_str()) {
                flags.push("PK");
            }
            if self.unique_keys.contains(&col.name) {
                flags.push("UNIQUE");
            }

            let flags_str = if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            };

            info.push_str(&format!("  {}: {}{}\n", col.name, col.data_type, flags_str));
        }
        info.push_str(&format!("Rows: {}\n", self.row_count));

        info
    }
}
