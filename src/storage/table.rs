//! Table storage for RelDB
//!
//! A table owns its schema, its row sequence, the surrogate id counter and
//! the equality indexes on its constrained columns. Rows are kept in
//! insertion order, which is also the default result order.

use super::index::EqualityIndex;
use super::value::{Predicate, Row, Value};
use crate::catalog::{Column, DataType, TableMeta};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Kind of JOIN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

/// `[INNER|LEFT] JOIN <table_name> ON <left_column> = <right_column>`
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    /// Right-hand table
    pub table_name: String,
    /// Column of the FROM table
    pub left_column: String,
    /// Column of the joined table
    pub right_column: String,
}

/// Single-column ORDER BY
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

/// Check a row against a conjunctive equality predicate.
///
/// A column missing from the row is a non-match.
pub fn matches(row: &Row, conditions: &Predicate) -> bool {
    conditions
        .iter()
        .all(|(column, value)| row.get(column) == Some(value))
}

/// Copy the listed columns out of a row. `None` or a `*` entry keeps the full row.
pub fn project(row: &Row, columns: Option<&[String]>) -> Row {
    match columns {
        Some(columns) if !columns.iter().any(|c| c == "*") => columns
            .iter()
            .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
            .collect(),
        _ => row.clone(),
    }
}

/// Sort rows on one column. Rows without the column sort as if it held 0.
pub fn sort_rows(rows: &mut [Row], order: &OrderBy) {
    let zero = Value::Integer(0);
    rows.sort_by(|a, b| {
        let left = a.get(&order.column).unwrap_or(&zero);
        let right = b.get(&order.column).unwrap_or(&zero);
        let ordering = left.sort_cmp(right);
        if order.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

/// Apply ordering, limit and projection to a result set, in that order
pub fn shape_rows(
    mut rows: Vec<Row>,
    columns: Option<&[String]>,
    order_by: Option<&OrderBy>,
    limit: Option<usize>,
) -> Vec<Row> {
    if let Some(order) = order_by {
        sort_rows(&mut rows, order);
    }
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    match columns {
        Some(_) => rows.iter().map(|row| project(row, columns)).collect(),
        None => rows,
    }
}

/// Coerce a value to a column's declared type
pub fn coerce(column: &Column, value: Value) -> Result<Value> {
    let coerced = match (column.data_type, &value) {
        (_, Value::Null) | (DataType::Timestamp, _) => Some(value.clone()),

        (DataType::Int, Value::Integer(_)) => Some(value.clone()),
        (DataType::Int, Value::Float(f))
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
        {
            Some(Value::Integer(*f as i64))
        }
        (DataType::Int, Value::Text(s)) => s.trim().parse::<i64>().ok().map(Value::Integer),

        (DataType::Float, Value::Integer(i)) => Some(Value::Float(*i as f64)),
        (DataType::Float, Value::Float(_)) => Some(value.clone()),
        (DataType::Float, Value::Text(s)) => s.trim().parse::<f64>().ok().map(Value::Float),

        (DataType::Varchar, Value::Text(_)) => Some(value.clone()),
        (DataType::Varchar, other) => Some(Value::Text(other.to_string())),

        (DataType::Boolean, Value::Boolean(_)) => Some(value.clone()),
        (DataType::Boolean, Value::Integer(0)) => Some(Value::Boolean(false)),
        (DataType::Boolean, Value::Integer(1)) => Some(Value::Boolean(true)),
        (DataType::Boolean, Value::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(Value::Boolean(true)),
            "false" | "0" => Some(Value::Boolean(false)),
            _ => None,
        },

        _ => None,
    };

    coerced.ok_or_else(|| Error::ColumnTypeMismatch {
        column: column.name.clone(),
        expected: column.data_type,
        found: format!("{} {}", value.type_name(), value.to_literal()),
    })
}

/// A table combining schema and rows
#[derive(Debug, Clone)]
pub struct Table {
    /// Table name
    name: String,
    /// Ordered column definitions
    columns: Vec<Column>,
    /// Primary key column
    primary_key: Option<String>,
    /// UNIQUE columns, without duplicates
    unique_keys: Vec<String>,
    /// Row sequence in insertion order
    rows: Vec<Row>,
    /// Next surrogate primary key
    next_id: i64,
    /// Equality indexes by column name
    indexes: HashMap<String, EqualityIndex>,
}

impl Table {
    /// Create a new empty table
    pub fn new(
        name: impl Into<String>,
        columns: Vec<Column>,
        primary_key: Option<String>,
        unique_keys: Vec<String>,
    ) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(unique_keys.len());
        for key in unique_keys {
            if !deduped.contains(&key) {
                deduped.push(key);
            }
        }

        let mut table = Self {
            name: name.into(),
            columns,
            primary_key,
            unique_keys: deduped,
            rows: Vec::new(),
            next_id: 1,
            indexes: HashMap::new(),
        };
        for column in table.constraint_columns() {
            table.create_index(&column);
        }
        table
    }

    /// Rebuild a table from its catalog record and row blob
    pub fn restore(name: impl Into<String>, meta: TableMeta, rows: Vec<Row>, next_id: i64) -> Self {
        let mut table = Self::new(name, meta.columns, meta.primary_key, meta.unique_keys);
        table.rows = rows;
        table.next_id = next_id;
        table.reindex();
        table
    }

    /// Get table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get column definitions
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get the primary key column
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Get the UNIQUE columns
    pub fn unique_keys(&self) -> &[String] {
        &self.unique_keys
    }

    /// Columns whose values must not repeat: the primary key, then UNIQUE columns
    pub fn constraint_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self.primary_key.iter().cloned().collect();
        for key in &self.unique_keys {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        columns
    }

    /// Get the stored rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the next surrogate id
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    /// Build the catalog record for this table
    pub fn meta(&self) -> TableMeta {
        TableMeta {
            columns: self.columns.clone(),
            primary_key: self.primary_key.clone(),
            unique_keys: self.unique_keys.clone(),
            row_count: self.rows.len(),
        }
    }

    /// Create an equality index on a column, populated from the current rows
    pub fn create_index(&mut self, column: &str) {
        let index = EqualityIndex::build(column, &self.rows);
        self.indexes.insert(column.to_string(), index);
    }

    /// Check if a column is indexed
    pub fn has_index(&self, column: &str) -> bool {
        self.indexes.contains_key(column)
    }

    fn reindex(&mut self) {
        for index in self.indexes.values_mut() {
            *index = EqualityIndex::build(index.column().to_string(), &self.rows);
        }
    }

    /// Coerce every declared field of `data` to its column type.
    ///
    /// The result lists schema columns first, in schema order, followed by
    /// any undeclared fields as given.
    pub fn coerce_row(&self, mut data: Row) -> Result<Row> {
        let mut row = Row::with_capacity(data.len());
        for column in &self.columns {
            if let Some(value) = data.shift_remove(&column.name) {
                row.insert(column.name.clone(), coerce(column, value)?);
            }
        }
        row.extend(data);
        Ok(row)
    }

    /// Fail with `UniqueConstraintViolation` if any constrained column of
    /// `row` holds a non-null value already stored in the table.
    ///
    /// Linear scan over the stored rows; NULLs never collide.
    pub fn check_unique(&self, row: &Row) -> Result<()> {
        for column in self.constraint_columns() {
            let value = match row.get(&column) {
                Some(value) if !value.is_null() => value,
                _ => continue,
            };
            if self.rows.iter().any(|stored| stored.get(&column) == Some(value)) {
                return Err(Error::UniqueConstraintViolation {
                    column,
                    value: value.to_literal(),
                });
            }
        }
        Ok(())
    }

    /// Move `next_id` past an explicit integer primary key
    fn advance_next_id(&mut self, key: &Value) {
        if let Some(n) = key.as_i64() {
            if n >= self.next_id {
                self.next_id = n.saturating_add(1);
            }
        }
    }

    /// Insert a row, returning its primary key (or the new row count when
    /// the table has no primary key).
    ///
    /// The surrogate id is assigned and the row coerced and checked against
    /// the unique columns before anything is stored.
    pub fn insert(&mut self, mut data: Row) -> Result<Value> {
        let mut assigned = false;
        if let Some(pk) = &self.primary_key {
            if data.get(pk).map_or(true, Value::is_null) {
                data.insert(pk.clone(), Value::Integer(self.next_id));
                assigned = true;
            }
        }

        let row = self.coerce_row(data)?;
        self.check_unique(&row)?;

        let id = match self.primary_key.as_ref() {
            Some(pk) => row.get(pk).cloned().unwrap_or(Value::Null),
            None => Value::Integer(self.rows.len() as i64 + 1),
        };
        if assigned {
            self.next_id += 1;
        } else if self.primary_key.is_some() {
            self.advance_next_id(&id);
        }

        let ordinal = self.rows.len();
        for index in self.indexes.values_mut() {
            index.add_row(&row, ordinal);
        }
        self.rows.push(row);

        Ok(id)
    }

    /// Row ordinals that may satisfy the predicate, in insertion order
    fn candidates(&self, conditions: Option<&Predicate>) -> Vec<usize> {
        if let Some(conditions) = conditions {
            for (column, value) in conditions {
                if let Some(index) = self.indexes.get(column) {
                    return index.find(value).iter().copied().collect();
                }
            }
        }
        (0..self.rows.len()).collect()
    }

    /// Row ordinals that satisfy the predicate, in insertion order
    fn matching_ids(&self, conditions: Option<&Predicate>) -> Vec<usize> {
        self.candidates(conditions)
            .into_iter()
            .filter(|&id| conditions.map_or(true, |c| matches(&self.rows[id], c)))
            .collect()
    }

    /// Query rows. Returned rows are copies.
    pub fn select(
        &self,
        columns: Option<&[String]>,
        conditions: Option<&Predicate>,
        order_by: Option<&OrderBy>,
        limit: Option<usize>,
    ) -> Vec<Row> {
        let rows = self
            .matching_ids(conditions)
            .into_iter()
            .map(|id| self.rows[id].clone())
            .collect();
        shape_rows(rows, columns, order_by, limit)
    }

    /// Apply assignments to every matching row, returning the count touched
    pub fn update(&mut self, updates: &Row, conditions: Option<&Predicate>) -> Result<usize> {
        let updates = self.coerce_row(updates.clone())?;
        let ids = self.matching_ids(conditions);

        for &id in &ids {
            for (column, value) in &updates {
                if let Some(index) = self.indexes.get_mut(column) {
                    if let Some(old) = self.rows[id].get(column) {
                        index.remove(old, id);
                    }
                    index.add(value.clone(), id);
                }
                self.rows[id].insert(column.clone(), value.clone());
            }
        }

        if !ids.is_empty() {
            let key = self.primary_key.as_ref().and_then(|pk| updates.get(pk)).cloned();
            if let Some(key) = key {
                self.advance_next_id(&key);
            }
        }

        Ok(ids.len())
    }

    /// Delete matching rows (all rows without a predicate), returning the count removed
    pub fn delete(&mut self, conditions: Option<&Predicate>) -> usize {
        let conditions = match conditions {
            Some(conditions) => conditions,
            None => {
                let count = self.rows.len();
                self.rows.clear();
                for index in self.indexes.values_mut() {
                    index.clear();
                }
                return count;
            }
        };

        let doomed: HashSet<usize> = self.matching_ids(Some(conditions)).into_iter().collect();
        if doomed.is_empty() {
            return 0;
        }

        let rows = std::mem::take(&mut self.rows);
        self.rows = rows
            .into_iter()
            .enumerate()
            .filter(|(id, _)| !doomed.contains(id))
            .map(|(_, row)| row)
            .collect();
        // ordinals shifted
        self.reindex();

        doomed.len()
    }

    /// Join this table's rows (left) with `right` on `left_column = right_column`.
    ///
    /// Merged rows take right-hand values on name collisions. A LEFT join also
    /// emits each unmatched left row on its own.
    pub fn join(
        &self,
        right: &[Row],
        kind: JoinKind,
        left_column: &str,
        right_column: &str,
    ) -> Vec<Row> {
        let mut joined = Vec::new();

        for left_row in &self.rows {
            let mut matched = false;
            if let Some(key) = left_row.get(left_column) {
                for right_row in right {
                    if right_row.get(right_column) == Some(key) {
                        let mut merged = left_row.clone();
                        merged.extend(right_row.iter().map(|(k, v)| (k.clone(), v.clone())));
                        joined.push(merged);
                        matched = true;
                    }
                }
            }
            if !matched && kind == JoinKind::Left {
                joined.push(left_row.clone());
            }
        }

        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[(&str, Value)]) -> Row {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn users() -> Table {
        Table::new(
            "users",
            vec![
                Column::new("id", DataType::Int),
                Column::new("name", DataType::Varchar),
                Column::new("email", DataType::Varchar),
            ],
            Some("id".to_string()),
            vec!["email".to_string()],
        )
    }

    #[test]
    fn test_surrogate_ids_are_monotonic() {
        let mut table = users();
        for i in 0..3 {
            let id = table
                .insert(row(&[("name", Value::from(format!("u{}", i)))]))
                .unwrap();
            assert_eq!(id, Value::Integer(i + 1));
        }

        let mut conditions = Predicate::new();
        conditions.insert("id".to_string(), Value::Integer(3));
        assert_eq!(table.delete(Some(&conditions)), 1);

        let id = table.insert(row(&[("name", Value::from("u4"))])).unwrap();
        assert_eq!(id, Value::Integer(4));
        assert_eq!(table.next_id(), 5);
    }

    #[test]
    fn test_explicit_key_advances_counter() {
        let mut table = users();
        let id = table
            .insert(row(&[("id", Value::Integer(10)), ("name", Value::from("a"))]))
            .unwrap();
        assert_eq!(id, Value::Integer(10));

        let id = table.insert(row(&[("name", Value::from("b"))])).unwrap();
        assert_eq!(id, Value::Integer(11));

        // explicit NULL counts as omitted
        let id = table
            .insert(row(&[("id", Value::Null), ("name", Value::from("c"))]))
            .unwrap();
        assert_eq!(id, Value::Integer(12));
    }

    #[test]
    fn test_update_of_key_advances_counter() {
        let mut table = users();
        table.insert(row(&[("name", Value::from("a"))])).unwrap();

        let mut conditions = Predicate::new();
        conditions.insert("id".to_string(), Value::Integer(1));
        let updates = row(&[("id", Value::Integer(2))]);
        assert_eq!(table.update(&updates, Some(&conditions)).unwrap(), 1);
        assert_eq!(table.next_id(), 3);

        let id = table.insert(row(&[("name", Value::from("b"))])).unwrap();
        assert_eq!(id, Value::Integer(3));
        let ids: Vec<&Value> = table.rows().iter().map(|r| &r["id"]).collect();
        assert_eq!(ids, vec![&Value::Integer(2), &Value::Integer(3)]);

        // an update that touches nothing leaves the counter alone
        conditions.insert("id".to_string(), Value::Integer(99));
        let updates = row(&[("id", Value::Integer(50))]);
        assert_eq!(table.update(&updates, Some(&conditions)).unwrap(), 0);
        assert_eq!(table.next_id(), 4);
    }

    #[test]
    fn test_surrogate_key_is_checked_for_uniqueness() {
        let mut table = Table::new(
            "codes",
            vec![
                Column::new("id", DataType::Varchar),
                Column::new("label", DataType::Varchar),
            ],
            Some("id".to_string()),
            Vec::new(),
        );
        table
            .insert(row(&[("id", Value::from("1")), ("label", Value::from("a"))]))
            .unwrap();

        // the surrogate 1 coerces to '1', which is taken
        let err = table
            .insert(row(&[("id", Value::Null), ("label", Value::from("b"))]))
            .unwrap_err();
        assert!(matches!(err, Error::UniqueConstraintViolation { ref column, ref value }
            if column == "id" && value == "'1'"));
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.next_id(), 1);
    }

    #[test]
    fn test_insert_without_primary_key_returns_count() {
        let mut table = Table::new(
            "logs",
            vec![Column::new("msg", DataType::Varchar)],
            None,
            Vec::new(),
        );
        assert_eq!(
            table.insert(row(&[("msg", Value::from("a"))])).unwrap(),
            Value::Integer(1)
        );
        assert_eq!(
            table.insert(row(&[("msg", Value::from("b"))])).unwrap(),
            Value::Integer(2)
        );
    }

    #[test]
    fn test_coercion() {
        let mut table = Table::new(
            "items",
            vec![
                Column::new("qty", DataType::Int),
                Column::new("price", DataType::Float),
                Column::new("label", DataType::Varchar),
                Column::new("active", DataType::Boolean),
                Column::new("seen", DataType::Timestamp),
            ],
            None,
            Vec::new(),
        );

        table
            .insert(row(&[
                ("label", Value::Integer(7)),
                ("qty", Value::from("12")),
                ("price", Value::Integer(3)),
                ("active", Value::from("TRUE")),
                ("seen", Value::from("2024-01-01 10:00")),
                ("extra", Value::Boolean(true)),
            ]))
            .unwrap();

        let stored = &table.rows()[0];
        assert_eq!(stored["qty"], Value::Integer(12));
        assert!(matches!(stored["price"], Value::Float(f) if f == 3.0));
        assert_eq!(stored["label"], Value::from("7"));
        assert_eq!(stored["active"], Value::Boolean(true));
        assert_eq!(stored["seen"], Value::from("2024-01-01 10:00"));
        assert_eq!(stored["extra"], Value::Boolean(true));

        // schema columns first, in schema order, then undeclared fields
        let keys: Vec<&str> = stored.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["qty", "price", "label", "active", "seen", "extra"]);

        let err = table.insert(row(&[("qty", Value::from("many"))])).unwrap_err();
        assert!(matches!(err, Error::ColumnTypeMismatch { ref column, .. } if column == "qty"));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_select_filter_order_limit_project() {
        let mut table = users();
        for name in ["carol", "alice", "bob"] {
            table.insert(row(&[("name", Value::from(name))])).unwrap();
        }

        let order = OrderBy {
            column: "name".to_string(),
            ascending: true,
        };
        let columns = vec!["name".to_string()];
        let result = table.select(Some(&columns), None, Some(&order), Some(2));
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], row(&[("name", Value::from("alice"))]));
        assert_eq!(result[1], row(&[("name", Value::from("bob"))]));

        let mut conditions = Predicate::new();
        conditions.insert("name".to_string(), Value::from("bob"));
        let result = table.select(None, Some(&conditions), None, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["id"], Value::Integer(3));

        // a missing predicate column never matches
        let mut conditions = Predicate::new();
        conditions.insert("age".to_string(), Value::Integer(1));
        assert!(table.select(None, Some(&conditions), None, None).is_empty());
    }

    #[test]
    fn test_projection_star_keeps_full_row() {
        let full = row(&[("a", Value::Integer(1)), ("b", Value::Integer(2))]);
        let columns = vec!["a".to_string(), "*".to_string()];
        assert_eq!(project(&full, Some(&columns)), full);

        let columns = vec!["b".to_string(), "missing".to_string()];
        assert_eq!(project(&full, Some(&columns)), row(&[("b", Value::Integer(2))]));
    }

    #[test]
    fn test_order_missing_column_sorts_as_zero() {
        let mut rows = vec![
            row(&[("n", Value::Integer(5))]),
            row(&[("other", Value::Integer(1))]),
            row(&[("n", Value::Integer(-2))]),
        ];
        sort_rows(
            &mut rows,
            &OrderBy {
                column: "n".to_string(),
                ascending: true,
            },
        );
        assert_eq!(rows[0]["n"], Value::Integer(-2));
        assert!(rows[1].get("n").is_none());
        assert_eq!(rows[2]["n"], Value::Integer(5));
    }

    #[test]
    fn test_update_and_index_maintenance() {
        let mut table = users();
        table
            .insert(row(&[("name", Value::from("a")), ("email", Value::from("a@x"))]))
            .unwrap();
        table
            .insert(row(&[("name", Value::from("b")), ("email", Value::from("b@x"))]))
            .unwrap();
        assert!(table.has_index("email"));

        let mut conditions = Predicate::new();
        conditions.insert("email".to_string(), Value::from("a@x"));
        let updates = row(&[("email", Value::from("c@x"))]);
        assert_eq!(table.update(&updates, Some(&conditions)).unwrap(), 1);

        assert!(table.select(None, Some(&conditions), None, None).is_empty());
        let mut conditions = Predicate::new();
        conditions.insert("email".to_string(), Value::from("c@x"));
        let result = table.select(None, Some(&conditions), None, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["name"], Value::from("a"));

        // no predicate touches every row
        let updates = row(&[("name", Value::from("z"))]);
        assert_eq!(table.update(&updates, None).unwrap(), 2);

        let bad = row(&[("id", Value::from("abc"))]);
        assert!(table.update(&bad, None).is_err());
    }

    #[test]
    fn test_delete_rebuilds_indexes() {
        let mut table = users();
        for email in ["a@x", "b@x", "c@x"] {
            table.insert(row(&[("email", Value::from(email))])).unwrap();
        }

        let mut conditions = Predicate::new();
        conditions.insert("email".to_string(), Value::from("a@x"));
        assert_eq!(table.delete(Some(&conditions)), 1);
        assert_eq!(table.delete(Some(&conditions)), 0);

        // ordinals shifted after the delete; lookups must still be right
        let mut conditions = Predicate::new();
        conditions.insert("email".to_string(), Value::from("c@x"));
        let result = table.select(None, Some(&conditions), None, None);
        assert_eq!(result[0]["id"], Value::Integer(3));

        assert_eq!(table.delete(None), 2);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_index_and_scan_agree() {
        let mut table = users();
        for i in 0..20 {
            table
                .insert(row(&[
                    ("name", Value::from(format!("n{}", i % 3))),
                    ("email", Value::from(format!("{}@x", i))),
                ]))
                .unwrap();
        }
        table.create_index("name");

        let mut conditions = Predicate::new();
        conditions.insert("name".to_string(), Value::from("n1"));
        let indexed = table.select(None, Some(&conditions), None, None);
        let scanned: Vec<Row> = table
            .rows()
            .iter()
            .filter(|r| matches(r, &conditions))
            .cloned()
            .collect();
        assert_eq!(indexed, scanned);
        assert_eq!(indexed.len(), 7);
    }

    #[test]
    fn test_join() {
        let mut orders = Table::new(
            "orders",
            vec![
                Column::new("id", DataType::Int),
                Column::new("customer_id", DataType::Int),
            ],
            Some("id".to_string()),
            Vec::new(),
        );
        orders
            .insert(row(&[("customer_id", Value::Integer(1))]))
            .unwrap();
        orders
            .insert(row(&[("customer_id", Value::Integer(99))]))
            .unwrap();

        let customers = vec![row(&[("id", Value::Integer(1)), ("name", Value::from("Ann"))])];

        let inner = orders.join(&customers, JoinKind::Inner, "customer_id", "id");
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0]["name"], Value::from("Ann"));
        assert_eq!(inner[0]["customer_id"], Value::Integer(1));

        let left = orders.join(&customers, JoinKind::Left, "customer_id", "id");
        assert_eq!(left.len(), 2);
        assert_eq!(
            left[1],
            row(&[("id", Value::Integer(2)), ("customer_id", Value::Integer(99))])
        );
    }
}
