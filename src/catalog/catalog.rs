//! System Catalog for RelDB
//!
//! The catalog owns every table and the backend they persist through.
//! Each mutation rewrites the affected row blob and, when the table set or a
//! row count changed, the catalog document.

use super::schema::{Column, TableMeta};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::table::{matches, shape_rows};
use crate::storage::{
    CatalogFile, FileBackend, Join, MemoryBackend, OrderBy, Predicate, Row, StorageBackend,
    Table, Value,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// System Catalog - table registry plus persistence
#[derive(Debug)]
pub struct Catalog {
    /// Tables by name
    tables: HashMap<String, Table>,
    /// Where the catalog document and row blobs are written
    backend: Box<dyn StorageBackend>,
}

impl Catalog {
    /// Open the catalog stored under `config.data_dir`, creating the
    /// directory when it does not exist yet
    pub fn open(config: &Config) -> Result<Self> {
        let backend = FileBackend::open(config.clone())?;
        Self::with_backend(Box::new(backend))
    }

    /// Create an empty catalog that never touches the file system
    pub fn in_memory() -> Self {
        Self {
            tables: HashMap::new(),
            backend: Box::new(MemoryBackend::new()),
        }
    }

    /// Load every table recorded by `backend`
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Result<Self> {
        let mut tables = HashMap::new();

        for (name, meta) in backend.load_catalog()?.unwrap_or_default() {
            let table = match backend.load_table(&name)? {
                Some(blob) => {
                    if blob.rows.len() != meta.row_count {
                        warn!(
                            table = %name,
                            recorded = meta.row_count,
                            found = blob.rows.len(),
                            "row count differs from catalog"
                        );
                    }
                    Table::restore(name.clone(), meta, blob.rows, blob.next_id)
                }
                None => {
                    warn!(table = %name, "row blob missing, loading table empty");
                    Table::restore(name.clone(), meta, Vec::new(), 1)
                }
            };
            tables.insert(name, table);
        }

        info!(tables = tables.len(), "catalog loaded");
        Ok(Self { tables, backend })
    }

    /// Flush the catalog document and release the backend
    pub fn close(mut self) -> Result<()> {
        self.save_catalog()?;
        info!(tables = self.tables.len(), "catalog closed");
        Ok(())
    }

    /// Create a new table
    pub fn create_table(
        &mut self,
        name: &str,
        columns: Vec<Column>,
        primary_key: Option<String>,
        unique_keys: Vec<String>,
    ) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(Error::TableAlreadyExists(name.to_string()));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::DuplicateColumn(
                    column.name.clone(),
                    name.to_string(),
                ));
            }
        }

        let table = Table::new(name, columns, primary_key, unique_keys);
        self.tables.insert(name.to_string(), table);
        self.save_catalog()?;
        self.backend.save_table(name, &[], 1)?;

        info!(table = name, "table created");
        Ok(())
    }

    /// Get a table by name
    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Check if a table exists
    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Insert a row, returning its primary key (or the new row count).
    ///
    /// Constraint violations are reported before the table or the backend
    /// is touched.
    pub fn insert(&mut self, table_name: &str, data: Row) -> Result<Value> {
        let table = self
            .tables
            .get_mut(table_name)
            .ok_or_else(|| Error::TableNotFound(table_name.to_string()))?;

        let id = table.insert(data)?;
        self.backend
            .save_table(table_name, table.rows(), table.next_id())?;
        self.save_catalog()?;

        debug!(table = table_name, id = %id, "row inserted");
        Ok(id)
    }

    /// Query one table
    pub fn select(
        &self,
        table_name: &str,
        columns: Option<&[String]>,
        conditions: Option<&Predicate>,
        order_by: Option<&OrderBy>,
        limit: Option<usize>,
    ) -> Result<Vec<Row>> {
        let table = self.get_table(table_name)?;
        Ok(table.select(columns, conditions, order_by, limit))
    }

    /// Query the join of two tables. WHERE, ORDER BY, LIMIT and the
    /// projection apply to the merged rows.
    pub fn select_join(
        &self,
        table_name: &str,
        join: &Join,
        columns: Option<&[String]>,
        conditions: Option<&Predicate>,
        order_by: Option<&OrderBy>,
        limit: Option<usize>,
    ) -> Result<Vec<Row>> {
        let left = self.get_table(table_name)?;
        let right = self.get_table(&join.table_name)?;

        let mut rows = left.join(right.rows(), join.kind, &join.left_column, &join.right_column);
        if let Some(conditions) = conditions {
            rows.retain(|row| matches(row, conditions));
        }
        Ok(shape_rows(rows, columns, order_by, limit))
    }

    /// Update matching rows, returning the count touched
    pub fn update(
        &mut self,
        table_name: &str,
        updates: &Row,
        conditions: Option<&Predicate>,
    ) -> Result<usize> {
        let table = self
            .tables
            .get_mut(table_name)
            .ok_or_else(|| Error::TableNotFound(table_name.to_string()))?;

        let count = table.update(updates, conditions)?;
        if count > 0 {
            self.backend
                .save_table(table_name, table.rows(), table.next_id())?;
        }

        debug!(table = table_name, count, "rows updated");
        Ok(count)
    }

    /// Delete matching rows, returning the count removed
    pub fn delete(&mut self, table_name: &str, conditions: Option<&Predicate>) -> Result<usize> {
        let table = self
            .tables
            .get_mut(table_name)
            .ok_or_else(|| Error::TableNotFound(table_name.to_string()))?;

        let count = table.delete(conditions);
        if count > 0 {
            self.backend
                .save_table(table_name, table.rows(), table.next_id())?;
            self.save_catalog()?;
        }

        debug!(table = table_name, count, "rows deleted");
        Ok(count)
    }

    /// Drop a table. Returns `false` if it did not exist.
    pub fn drop_table(&mut self, name: &str) -> Result<bool> {
        if self.tables.remove(name).is_none() {
            return Ok(false);
        }

        self.backend.delete_table(name)?;
        self.save_catalog()?;

        info!(table = name, "table dropped");
        Ok(true)
    }

    /// List all table names, sorted
    pub fn list_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the catalog record for a table
    pub fn table_meta(&self, name: &str) -> Result<TableMeta> {
        self.get_table(name).map(Table::meta)
    }

    /// Describe a table's layout
    pub fn describe(&self, name: &str) -> Result<String> {
        Ok(self.table_meta(name)?.describe(name))
    }

    fn save_catalog(&mut self) -> Result<()> {
        let document: CatalogFile = self
            .tables
            .iter()
            .map(|(name, table)| (name.clone(), table.meta()))
            .collect();
        self.backend.save_catalog(&document)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DataType;
    use crate::storage::JoinKind;

    fn row(fields: &[(&str, Value)]) -> Row {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn predicate(column: &str, value: Value) -> Predicate {
        row(&[(column, value)])
    }

    fn users_catalog() -> Catalog {
        let mut catalog = Catalog::in_memory();
        catalog
            .create_table(
                "users",
                vec![
                    Column::new("id", DataType::Int),
                    Column::new("name", DataType::Varchar),
                    Column::new("email", DataType::Varchar),
                ],
                Some("id".to_string()),
                vec!["email".to_string()],
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_create_table() {
        let mut catalog = users_catalog();
        assert!(catalog.table_exists("users"));
        assert_eq!(catalog.list_tables(), vec!["users".to_string()]);

        let err = catalog
            .create_table("users", vec![], None, vec![])
            .unwrap_err();
        assert!(matches!(err, Error::TableAlreadyExists(name) if name == "users"));

        let err = catalog
            .create_table(
                "dup",
                vec![
                    Column::new("a", DataType::Int),
                    Column::new("a", DataType::Varchar),
                ],
                None,
                vec![],
            )
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(col, table) if col == "a" && table == "dup"));
        assert!(!catalog.table_exists("dup"));
    }

    #[test]
    fn test_missing_table() {
        let mut catalog = Catalog::in_memory();
        assert!(matches!(
            catalog.insert("ghost", Row::new()),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            catalog.select("ghost", None, None, None, None),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            catalog.update("ghost", &Row::new(), None),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            catalog.delete("ghost", None),
            Err(Error::TableNotFound(_))
        ));
        assert!(!catalog.drop_table("ghost").unwrap());
    }

    #[test]
    fn test_unique_violation_leaves_table_untouched() {
        let mut catalog = users_catalog();
        catalog
            .insert("users", row(&[("name", "Ann".into()), ("email", "a@x".into())]))
            .unwrap();

        let err = catalog
            .insert("users", row(&[("name", "Bob".into()), ("email", "a@x".into())]))
            .unwrap_err();
        assert!(matches!(err, Error::UniqueConstraintViolation { ref column, .. } if column == "email"));

        let table = catalog.get_table("users").unwrap();
        assert_eq!(table.row_count(), 1);
        // the failed insert did not consume a surrogate id
        assert_eq!(table.next_id(), 2);

        // explicit duplicate primary key
        let err = catalog
            .insert("users", row(&[("id", Value::Integer(1)), ("email", "b@x".into())]))
            .unwrap_err();
        assert!(matches!(err, Error::UniqueConstraintViolation { ref column, .. } if column == "id"));
    }

    #[test]
    fn test_null_unique_values_do_not_collide() {
        let mut catalog = users_catalog();
        catalog
            .insert("users", row(&[("email", Value::Null)]))
            .unwrap();
        catalog
            .insert("users", row(&[("email", Value::Null)]))
            .unwrap();
        assert_eq!(catalog.get_table("users").unwrap().row_count(), 2);
    }

    #[test]
    fn test_update_and_delete() {
        let mut catalog = users_catalog();
        for (name, email) in [("Ann", "a@x"), ("Bob", "b@x"), ("Cy", "c@x")] {
            catalog
                .insert("users", row(&[("name", name.into()), ("email", email.into())]))
                .unwrap();
        }

        let count = catalog
            .update(
                "users",
                &row(&[("name", "Bobby".into())]),
                Some(&predicate("id", Value::Integer(2))),
            )
            .unwrap();
        assert_eq!(count, 1);

        let rows = catalog
            .select("users", None, Some(&predicate("name", "Bobby".into())), None, None)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["email"], Value::from("b@x"));

        assert_eq!(
            catalog
                .delete("users", Some(&predicate("name", "nobody".into())))
                .unwrap(),
            0
        );
        assert_eq!(catalog.delete("users", None).unwrap(), 3);
        assert!(catalog
            .select("users", None, None, None, None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_select_join() {
        let mut catalog = users_catalog();
        catalog
            .create_table(
                "orders",
                vec![
                    Column::new("order_id", DataType::Int),
                    Column::new("user_id", DataType::Int),
                    Column::new("item", DataType::Varchar),
                ],
                Some("order_id".to_string()),
                vec![],
            )
            .unwrap();

        catalog
            .insert("users", row(&[("name", "Ann".into()), ("email", "a@x".into())]))
            .unwrap();
        catalog
            .insert("users", row(&[("name", "Bob".into()), ("email", "b@x".into())]))
            .unwrap();
        catalog
            .insert("orders", row(&[("user_id", Value::Integer(1)), ("item", "pen".into())]))
            .unwrap();

        let join = Join {
            kind: JoinKind::Left,
            table_name: "orders".to_string(),
            left_column: "id".to_string(),
            right_column: "user_id".to_string(),
        };
        let columns = vec!["name".to_string(), "item".to_string()];
        let rows = catalog
            .select_join("users", &join, Some(&columns), None, None, None)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["item"], Value::from("pen"));
        assert!(rows[1].get("item").is_none());

        let rows = catalog
            .select_join(
                "users",
                &join,
                None,
                Some(&predicate("item", "pen".into())),
                None,
                None,
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], Value::from("Ann"));

        let missing = Join {
            table_name: "nope".to_string(),
            ..join
        };
        assert!(matches!(
            catalog.select_join("users", &missing, None, None, None, None),
            Err(Error::TableNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_reopen_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new().data_dir(dir.path().join("db"));

        {
            let mut catalog = Catalog::open(&config).unwrap();
            catalog
                .create_table(
                    "users",
                    vec![
                        Column::new("id", DataType::Int),
                        Column::new("name", DataType::Varchar),
                    ],
                    Some("id".to_string()),
                    vec![],
                )
                .unwrap();
            catalog
                .insert("users", row(&[("name", "Ann".into())]))
                .unwrap();
            catalog
                .insert("users", row(&[("name", "Bob".into())]))
                .unwrap();
            catalog.close().unwrap();
        }

        let mut catalog = Catalog::open(&config).unwrap();
        let table = catalog.get_table("users").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.next_id(), 3);
        assert!(table.has_index("id"));

        let id = catalog
            .insert("users", row(&[("name", "Cy".into())]))
            .unwrap();
        assert_eq!(id, Value::Integer(3));

        let meta = catalog.table_meta("users").unwrap();
        assert_eq!(meta.row_count, 3);
        assert!(catalog.describe("users").unwrap().contains("id: int (PK)"));
    }

    #[test]
    fn test_missing_blob_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new().data_dir(dir.path());

        let mut catalog = Catalog::open(&config).unwrap();
        catalog
            .create_table("t", vec![Column::new("a", DataType::Int)], None, vec![])
            .unwrap();
        catalog.insert("t", row(&[("a", Value::Integer(1))])).unwrap();
        catalog.close().unwrap();

        std::fs::remove_file(config.table_path("t")).unwrap();

        let catalog = Catalog::open(&config).unwrap();
        assert_eq!(catalog.get_table("t").unwrap().row_count(), 0);
    }

    #[test]
    fn test_drop_removes_blob() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new().data_dir(dir.path());

        let mut catalog = Catalog::open(&config).unwrap();
        catalog
            .create_table("t", vec![Column::new("a", DataType::Int)], None, vec![])
            .unwrap();
        assert!(config.table_path("t").exists());

        assert!(catalog.drop_table("t").unwrap());
        assert!(!config.table_path("t").exists());
        assert!(catalog.list_tables().is_empty());
    }
}
