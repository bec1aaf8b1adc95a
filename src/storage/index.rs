//! Equality index for RelDB
//!
//! Maps a column value to the ordinals of the rows holding it. Ordinals are
//! positions in the owning table's row sequence, so a set iterates in
//! insertion order.

use super::value::{Row, Value};
use std::collections::{BTreeSet, HashMap};

static NO_ROWS: BTreeSet<usize> = BTreeSet::new();

/// Per-column equality index
#[derive(Debug, Clone)]
pub struct EqualityIndex {
    /// Indexed column
    column: String,
    /// Value to row ordinals
    entries: HashMap<Value, BTreeSet<usize>>,
}

impl EqualityIndex {
    /// Create an empty index on `column`
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            entries: HashMap::new(),
        }
    }

    /// Build an index over existing rows
    pub fn build(column: impl Into<String>, rows: &[Row]) -> Self {
        let mut index = Self::new(column);
        for (id, row) in rows.iter().enumerate() {
            index.add_row(row, id);
        }
        index
    }

    /// Get the indexed column name
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Record that row `id` holds `value`
    pub fn add(&mut self, value: Value, id: usize) {
        self.entries.entry(value).or_default().insert(id);
    }

    /// Forget that row `id` holds `value`
    pub fn remove(&mut self, value: &Value, id: usize) {
        if let Some(ids) = self.entries.get_mut(value) {
            ids.remove(&id);
            if ids.is_empty() {
                self.entries.remove(value);
            }
        }
    }

    /// Row ordinals holding `value`
    pub fn find(&self, value: &Value) -> &BTreeSet<usize> {
        self.entries.get(value).unwrap_or(&NO_ROWS)
    }

    /// Index the row's value for this column, if it has one
    pub fn add_row(&mut self, row: &Row, id: usize) {
        if let Some(value) = row.get(&self.column) {
            self.add(value.clone(), id);
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index holds no values
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
